use super::channel_resolver::ChannelResolver;
use super::requirement_builder::{assemble_spec, RequirementBuilder};
use crate::env_reduction::domain::{EnvironmentSpec, PackageCatalog, VersionPolicy};
use crate::shared::error::ReductionError;
use std::collections::HashMap;

/// Knobs of a relax run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxPolicy {
    /// Policy for every package not pinned or overridden
    pub how: VersionPolicy,
    /// Packages kept at their exact installed version
    pub pin: Vec<String>,
    /// Per-package policies; a later entry for the same package wins
    pub overrides: Vec<(String, VersionPolicy)>,
}

impl Default for RelaxPolicy {
    fn default() -> Self {
        Self {
            how: VersionPolicy::Minor,
            pin: Vec::new(),
            overrides: Vec::new(),
        }
    }
}

/// Relaxer service re-emitting a whole environment with loosened versions
pub struct Relaxer;

impl Relaxer {
    /// Emits every cataloged package under its resolved policy.
    ///
    /// # Errors
    /// `ConflictingPolicy` when one installed package is both pinned and
    /// overridden. Nothing is rendered in that case.
    pub fn relax(
        catalog: &PackageCatalog,
        channels: &ChannelResolver,
        env_name: &str,
        policy: &RelaxPolicy,
    ) -> Result<EnvironmentSpec, ReductionError> {
        let pinned: Vec<&str> = policy
            .pin
            .iter()
            .filter_map(|name| catalog.canonical_name(name))
            .collect();
        let overrides: HashMap<&str, VersionPolicy> = policy
            .overrides
            .iter()
            .filter_map(|(name, how)| catalog.canonical_name(name).map(|c| (c, *how)))
            .collect();

        if let Some(conflict) = pinned.iter().find(|name| overrides.contains_key(*name)) {
            return Err(ReductionError::ConflictingPolicy {
                package: conflict.to_string(),
            });
        }

        let mut how_by_package: HashMap<&str, VersionPolicy> = catalog
            .names()
            .map(|name| (name, policy.how))
            .collect();
        how_by_package.extend(pinned.iter().map(|name| (*name, VersionPolicy::Full)));
        how_by_package.extend(overrides);

        let packages = catalog.packages().iter().map(|package| {
            let how = how_by_package
                .get(package.canonical_name())
                .copied()
                .unwrap_or(policy.how);
            (package, RequirementBuilder::new(how, false))
        });

        Ok(assemble_spec(env_name, channels, packages))
    }
}
