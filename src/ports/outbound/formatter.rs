use crate::env_reduction::domain::{DependencyTree, EnvironmentSpec};
use crate::shared::Result;

/// EnvironmentFormatter port for rendering results
///
/// This port abstracts the output syntax (YAML environment file, JSON).
pub trait EnvironmentFormatter {
    /// Renders a reduced environment specification
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, spec: &EnvironmentSpec) -> Result<String>;

    /// Renders the leveled dependency tree of `package`
    fn format_tree(&self, package: &str, tree: &DependencyTree) -> Result<String>;
}
