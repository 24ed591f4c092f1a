use crate::env_reduction::domain::RawPackageRecord;
use crate::ports::outbound::{EnvironmentInventory, EnvironmentTarget, InventoryProvider};
use crate::shared::error::EnvError;
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Accepted snapshot layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    /// Plain `conda list --json` output
    Listing(Vec<RawPackageRecord>),
    /// Listing wrapped with the environment identity
    Document {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        prefix: Option<PathBuf>,
        packages: Vec<RawPackageRecord>,
    },
}

/// SnapshotReader adapter reading an environment inventory from a JSON file
///
/// Lets the tool run on machines without the environment (or without conda).
/// The file gets the same symlink, size and regular-file checks as every
/// other file this crate reads.
pub struct SnapshotReader {
    path: PathBuf,
}

impl SnapshotReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn invalid(&self, details: impl Into<String>) -> anyhow::Error {
        EnvError::InvalidSnapshot {
            path: self.path.clone(),
            details: details.into(),
        }
        .into()
    }

    fn default_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "environment".to_string())
    }
}

impl InventoryProvider for SnapshotReader {
    fn read_inventory(&self, target: &EnvironmentTarget) -> Result<EnvironmentInventory> {
        let content = safe_read_to_string(&self.path, "snapshot")?;

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| self.invalid(e.to_string()))?;
        let (stored_name, stored_prefix, mut packages) = match snapshot {
            Snapshot::Listing(packages) => (None, None, packages),
            Snapshot::Document {
                name,
                prefix,
                packages,
            } => (name, prefix, packages),
        };

        for (position, record) in packages.iter_mut().enumerate() {
            if record.name.trim().is_empty() {
                return Err(self.invalid(format!("package #{} has no name", position + 1)));
            }
            if record.dist_name.is_empty() {
                record.dist_name =
                    format!("{}-{}-{}", record.name, record.version, record.build_string);
            }
        }

        let name = match target {
            EnvironmentTarget::Name(name) => name.clone(),
            EnvironmentTarget::Path(path) => name_from_path(path),
            EnvironmentTarget::Active => stored_name.unwrap_or_else(|| self.default_name()),
        };
        let prefix = match target {
            EnvironmentTarget::Path(path) => Some(path.clone()),
            _ => stored_prefix,
        };

        log::info!(
            "Read {} packages from snapshot {}",
            packages.len(),
            self.path.display()
        );
        Ok(EnvironmentInventory::new(name, prefix, packages))
    }
}

fn name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
