use conda_minify::env_reduction::domain::RawDependencies;
use conda_minify::ports::outbound::EnvironmentInventory;
use conda_minify::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock MetadataResolver with per-package dependency lists
#[derive(Default, Clone)]
pub struct MockMetadataResolver {
    depends: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depends(mut self, name: &str, depends: &[&str]) -> Self {
        self.depends.insert(
            name.to_string(),
            depends.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    /// Makes lookups of `name` fail as if its metadata file were corrupt
    pub fn failing_for(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl MetadataResolver for MockMetadataResolver {
    fn resolve_dependencies(
        &self,
        _inventory: &EnvironmentInventory,
        record: &RawPackageRecord,
    ) -> Result<Option<RawDependencies>> {
        self.lookups.lock().unwrap().push(record.name.clone());
        if self.failing.contains(&record.name) {
            anyhow::bail!("Failed to parse index.json of {}", record.name);
        }
        Ok(self
            .depends
            .get(&record.name)
            .map(|deps| RawDependencies::List(deps.clone())))
    }
}
