use super::tree_view::TreeView;
use crate::env_reduction::domain::{DependencyTree, EnvironmentSpec};
use crate::ports::outbound::EnvironmentFormatter;
use crate::shared::Result;

/// YamlFormatter adapter producing `environment.yml` files
///
/// Keys come out in `name`, `channels`, `dependencies` order, which is the
/// layout `conda env create -f` expects.
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentFormatter for YamlFormatter {
    fn format(&self, spec: &EnvironmentSpec) -> Result<String> {
        serde_yaml_ng::to_string(spec)
            .map_err(|e| anyhow::anyhow!("Failed to serialize environment to YAML: {}", e))
    }

    fn format_tree(&self, package: &str, tree: &DependencyTree) -> Result<String> {
        serde_yaml_ng::to_string(&TreeView::new(package, tree))
            .map_err(|e| anyhow::anyhow!("Failed to serialize dependency tree to YAML: {}", e))
    }
}
