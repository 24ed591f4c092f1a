use conda_minify::prelude::*;
use conda_minify::ports::outbound::EnvironmentInventory;
use std::path::PathBuf;

/// Mock InventoryProvider serving a fixed package list
pub struct MockInventoryProvider {
    name: String,
    prefix: Option<PathBuf>,
    packages: Vec<RawPackageRecord>,
    missing: bool,
}

impl MockInventoryProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: None,
            packages: Vec::new(),
            missing: false,
        }
    }

    /// Simulates an environment the package manager does not know
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::new("missing")
        }
    }

    pub fn with_prefix(mut self, prefix: PathBuf) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Adds a native package from `channel`
    pub fn with_package(mut self, name: &str, version: &str, channel: &str) -> Self {
        self.packages
            .push(RawPackageRecord::new(name, version, "0", channel));
        self
    }

    /// Adds a native package whose dependencies are already known
    pub fn with_package_depending_on(
        mut self,
        name: &str,
        version: &str,
        channel: &str,
        depends: &[&str],
    ) -> Self {
        let depends = depends.iter().map(|d| d.to_string()).collect();
        self.packages.push(
            RawPackageRecord::new(name, version, "0", channel)
                .with_depends(conda_minify::env_reduction::domain::RawDependencies::List(depends)),
        );
        self
    }
}

impl InventoryProvider for MockInventoryProvider {
    fn read_inventory(&self, target: &EnvironmentTarget) -> Result<EnvironmentInventory> {
        if self.missing {
            return Err(EnvError::EnvironmentNotFound {
                target: target.to_string(),
            }
            .into());
        }
        Ok(EnvironmentInventory::new(
            self.name.clone(),
            self.prefix.clone(),
            self.packages.clone(),
        ))
    }
}
