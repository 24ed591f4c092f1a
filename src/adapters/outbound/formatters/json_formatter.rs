use super::tree_view::TreeView;
use crate::env_reduction::domain::{DependencyTree, EnvironmentSpec};
use crate::ports::outbound::EnvironmentFormatter;
use crate::shared::Result;

/// JsonFormatter adapter producing pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentFormatter for JsonFormatter {
    fn format(&self, spec: &EnvironmentSpec) -> Result<String> {
        let mut json = serde_json::to_string_pretty(spec)
            .map_err(|e| anyhow::anyhow!("Failed to serialize environment to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }

    fn format_tree(&self, package: &str, tree: &DependencyTree) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&TreeView::new(package, tree))
            .map_err(|e| anyhow::anyhow!("Failed to serialize dependency tree to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::collections::BTreeSet;

    #[test]
    fn test_json_environment() {
        let spec = EnvironmentSpec::new(
            "env".to_string(),
            vec!["conda-forge".to_string()],
            vec!["numpy=1.26.0".to_string()],
            vec!["rich==13.7.0".to_string()],
        );
        let output = JsonFormatter::new().format(&spec).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "env");
        assert_eq!(value["channels"][0], "conda-forge");
        assert_eq!(value["dependencies"][0], "numpy=1.26.0");
        assert_eq!(value["dependencies"][1]["pip"][0], "rich==13.7.0");
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_json_tree_levels_are_keyed_by_depth() {
        let mut tree = DependencyTree::new();
        tree.insert(0, BTreeSet::from(["a".to_string()]));
        tree.insert(2, BTreeSet::from(["c".to_string()]));

        let output = JsonFormatter::new().format_tree("a", &tree).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["package"], "a");
        assert_eq!(value["levels"]["0"][0], "a");
        assert_eq!(value["levels"]["2"][0], "c");
    }
}
