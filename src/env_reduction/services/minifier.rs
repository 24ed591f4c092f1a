use super::channel_resolver::ChannelResolver;
use super::requirement_builder::{assemble_spec, RequirementBuilder};
use crate::env_reduction::domain::{
    DependencyGraph, EnvironmentSpec, PackageCatalog, VersionPolicy,
};
use std::collections::HashSet;

/// Knobs of a minify run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinifyPolicy {
    /// Packages kept even though another package depends on them
    pub include: Vec<String>,
    /// Packages dropped even though they are top-level
    pub exclude: Vec<String>,
    /// Keep the direct dependencies of excluded packages instead
    pub add_exclusion_deps: bool,
    pub how: VersionPolicy,
    /// Append build strings to native requirements
    pub add_builds: bool,
}

/// Minifier service reducing an environment to its top-level packages
///
/// Pure computation over an already built catalog and graph.
pub struct Minifier;

impl Minifier {
    /// Emits `top-level ∪ include \ exclude`, in catalog order.
    ///
    /// Names in `include`/`exclude` may use any spelling; packages that are
    /// not installed are ignored.
    pub fn minify(
        catalog: &PackageCatalog,
        graph: &DependencyGraph,
        channels: &ChannelResolver,
        env_name: &str,
        policy: &MinifyPolicy,
    ) -> EnvironmentSpec {
        let mut include = Self::canonical_names(catalog, &policy.include);
        let exclude = Self::canonical_names(catalog, &policy.exclude);

        if policy.add_exclusion_deps {
            for excluded in &exclude {
                let Some(package) = catalog.get(excluded) else {
                    continue;
                };
                for dep in graph.get_package_dependencies(package.normalized_key()) {
                    // Dependencies that are not installed cannot be emitted
                    if let Some(canonical) = catalog.canonical_for_key(&dep) {
                        include.insert(canonical.to_string());
                    }
                }
            }
        }

        let mut selected: HashSet<String> = graph
            .highest_dependents()
            .iter()
            .filter_map(|key| catalog.canonical_for_key(key))
            .map(str::to_string)
            .collect();
        selected.extend(include);
        selected.retain(|name| !exclude.contains(name));

        log::debug!(
            "Minify kept {} of {} packages",
            selected.len(),
            catalog.len()
        );

        let builder = RequirementBuilder::new(policy.how, policy.add_builds);
        let packages = catalog
            .packages()
            .iter()
            .filter(|package| selected.contains(package.canonical_name()))
            .map(|package| (package, builder));

        assemble_spec(env_name, channels, packages)
    }

    fn canonical_names(catalog: &PackageCatalog, names: &[String]) -> HashSet<String> {
        names
            .iter()
            .filter_map(|name| catalog.canonical_name(name))
            .map(str::to_string)
            .collect()
    }
}
