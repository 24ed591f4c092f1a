use serde::{Deserialize, Serialize};

/// One entry of the `dependencies` list
///
/// Native requirements are plain strings; index packages are grouped into a
/// single nested `{pip: [...]}` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Requirement(String),
    Pip { pip: Vec<String> },
}

/// Reduced environment specification in `environment.yml` shape
///
/// Field order is the serialized key order: `name`, `channels`, `dependencies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    pub channels: Vec<String>,
    pub dependencies: Vec<DependencyEntry>,
}

impl EnvironmentSpec {
    /// Assembles a spec; the pip block is appended last and only when non-empty.
    pub fn new(
        name: String,
        channels: Vec<String>,
        native: Vec<String>,
        pip: Vec<String>,
    ) -> Self {
        let mut dependencies: Vec<DependencyEntry> =
            native.into_iter().map(DependencyEntry::Requirement).collect();
        if !pip.is_empty() {
            dependencies.push(DependencyEntry::Pip { pip });
        }
        Self {
            name,
            channels,
            dependencies,
        }
    }

    /// Native requirement lines in output order
    pub fn native_requirements(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter_map(|entry| match entry {
                DependencyEntry::Requirement(line) => Some(line.as_str()),
                DependencyEntry::Pip { .. } => None,
            })
            .collect()
    }

    /// Index (pip) requirement lines in output order
    pub fn pip_requirements(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .flat_map(|entry| match entry {
                DependencyEntry::Requirement(_) => [].as_slice(),
                DependencyEntry::Pip { pip } => pip.as_slice(),
            })
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pip_block_is_last() {
        let spec = EnvironmentSpec::new(
            "analysis".to_string(),
            vec!["conda-forge".to_string()],
            vec!["pandas=2.1.0".to_string(), "python=3.11.5".to_string()],
            vec!["rich==13.7.0".to_string()],
        );

        assert_eq!(spec.dependencies.len(), 3);
        assert_eq!(
            spec.dependencies.last(),
            Some(&DependencyEntry::Pip {
                pip: vec!["rich==13.7.0".to_string()]
            })
        );
        assert_eq!(spec.native_requirements(), vec!["pandas=2.1.0", "python=3.11.5"]);
        assert_eq!(spec.pip_requirements(), vec!["rich==13.7.0"]);
    }

    #[test]
    fn test_no_pip_block_without_pip_packages() {
        let spec = EnvironmentSpec::new(
            "base".to_string(),
            vec![],
            vec!["foo=1.2.3".to_string()],
            vec![],
        );
        assert_eq!(
            spec.dependencies,
            vec![DependencyEntry::Requirement("foo=1.2.3".to_string())]
        );
        assert!(spec.pip_requirements().is_empty());
    }

    #[test]
    fn test_serializes_in_environment_file_shape() {
        let spec = EnvironmentSpec::new(
            "env".to_string(),
            vec!["defaults".to_string()],
            vec!["numpy=1.26.0".to_string()],
            vec!["rich==13.7.0".to_string()],
        );
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(
            json,
            r#"{"name":"env","channels":["defaults"],"dependencies":["numpy=1.26.0",{"pip":["rich==13.7.0"]}]}"#
        );
    }
}
