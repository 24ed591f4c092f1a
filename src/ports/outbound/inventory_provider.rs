use crate::env_reduction::domain::RawPackageRecord;
use crate::shared::Result;
use std::fmt;
use std::path::PathBuf;

/// Which environment to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentTarget {
    /// The currently activated environment
    Active,
    /// Environment registered with the package manager under this name
    Name(String),
    /// Environment at this prefix directory
    Path(PathBuf),
}

impl EnvironmentTarget {
    /// Interprets a `--name` value: anything containing a path separator is a
    /// prefix path, everything else an environment name.
    pub fn parse(value: &str) -> Self {
        if value.contains('/') || value.contains('\\') {
            EnvironmentTarget::Path(PathBuf::from(value))
        } else {
            EnvironmentTarget::Name(value.to_string())
        }
    }
}

impl fmt::Display for EnvironmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentTarget::Active => write!(f, "active environment"),
            EnvironmentTarget::Name(name) => write!(f, "{}", name),
            EnvironmentTarget::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything the inventory provider knows about one environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInventory {
    /// Environment name used in the exported spec
    pub name: String,
    /// Absolute prefix of the environment, when known
    pub prefix: Option<PathBuf>,
    /// Installed packages in the order the provider reported them
    pub packages: Vec<RawPackageRecord>,
}

impl EnvironmentInventory {
    pub fn new(name: String, prefix: Option<PathBuf>, packages: Vec<RawPackageRecord>) -> Self {
        Self {
            name,
            prefix,
            packages,
        }
    }
}

/// InventoryProvider port for listing the packages of an environment
///
/// # Errors
/// Implementations return `EnvError::EnvironmentNotFound` unchanged when the
/// target does not exist; callers rely on seeing that variant.
pub trait InventoryProvider {
    fn read_inventory(&self, target: &EnvironmentTarget) -> Result<EnvironmentInventory>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(
            EnvironmentTarget::parse("analysis"),
            EnvironmentTarget::Name("analysis".to_string())
        );
        assert_eq!(
            EnvironmentTarget::parse("/opt/envs/analysis"),
            EnvironmentTarget::Path(PathBuf::from("/opt/envs/analysis"))
        );
        assert_eq!(
            EnvironmentTarget::parse(r"C:\envs\analysis"),
            EnvironmentTarget::Path(PathBuf::from(r"C:\envs\analysis"))
        );
    }

    #[test]
    fn test_display_target() {
        assert_eq!(EnvironmentTarget::parse("base").to_string(), "base");
        assert_eq!(EnvironmentTarget::parse("./envs/dev").to_string(), "./envs/dev");
        assert_eq!(EnvironmentTarget::Active.to_string(), "active environment");
    }
}
