use crate::env_reduction::domain::{CyclePolicy, DEFAULT_TREE_DEPTH};
use crate::env_reduction::services::{MinifyPolicy, RelaxPolicy};
use crate::ports::outbound::EnvironmentTarget;

/// What the export should produce from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportMethod {
    /// Top-level packages plus explicit inclusions, minus exclusions
    Minify(MinifyPolicy),
    /// Every installed package with loosened or pinned versions
    Relax(RelaxPolicy),
    /// Leveled dependency tree below one package
    Tree { package: String, max_depth: usize },
}

impl ExportMethod {
    pub fn tree(package: impl Into<String>) -> Self {
        ExportMethod::Tree {
            package: package.into(),
            max_depth: DEFAULT_TREE_DEPTH,
        }
    }
}

/// Request DTO for exporting an environment
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Environment to inspect
    pub target: EnvironmentTarget,
    /// Requested export
    pub method: ExportMethod,
    /// Behavior when a dependency edge would close a cycle
    pub cycle_policy: CyclePolicy,
}

impl ExportRequest {
    pub fn new(target: EnvironmentTarget, method: ExportMethod, cycle_policy: CyclePolicy) -> Self {
        Self {
            target,
            method,
            cycle_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_uses_default_depth() {
        assert_eq!(
            ExportMethod::tree("pandas"),
            ExportMethod::Tree {
                package: "pandas".to_string(),
                max_depth: DEFAULT_TREE_DEPTH,
            }
        );
    }

    #[test]
    fn test_request_new() {
        let request = ExportRequest::new(
            EnvironmentTarget::Name("analysis".to_string()),
            ExportMethod::Relax(RelaxPolicy::default()),
            CyclePolicy::Raise,
        );
        assert_eq!(request.target, EnvironmentTarget::Name("analysis".to_string()));
        assert_eq!(request.cycle_policy, CyclePolicy::Raise);
    }
}
