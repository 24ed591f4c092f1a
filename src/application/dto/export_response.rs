use crate::env_reduction::domain::{DependencyTree, EnvironmentSpec, NameCollision};

/// Result of an export, ready to be handed to a formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    Environment(EnvironmentSpec),
    Tree {
        package: String,
        tree: DependencyTree,
    },
}

/// Response DTO for an environment export
#[derive(Debug, Clone)]
pub struct ExportResponse {
    /// Name of the inspected environment
    pub environment_name: String,
    /// Number of packages in the catalog
    pub package_count: usize,
    /// Packages whose dependency metadata could not be found or read
    pub missing_metadata: Vec<String>,
    /// Distinct spellings that collapsed onto one normalized name
    pub collisions: Vec<NameCollision>,
    pub output: ExportOutput,
}

impl ExportResponse {
    pub fn new(
        environment_name: String,
        package_count: usize,
        missing_metadata: Vec<String>,
        collisions: Vec<NameCollision>,
        output: ExportOutput,
    ) -> Self {
        Self {
            environment_name,
            package_count,
            missing_metadata,
            collisions,
            output,
        }
    }

    /// The exported specification, if the request was minify or relax
    pub fn environment(&self) -> Option<&EnvironmentSpec> {
        match &self.output {
            ExportOutput::Environment(spec) => Some(spec),
            ExportOutput::Tree { .. } => None,
        }
    }
}
