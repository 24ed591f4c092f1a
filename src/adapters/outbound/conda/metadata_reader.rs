use crate::env_reduction::domain::{normalize_name, PackageOrigin, RawDependencies, RawPackageRecord};
use crate::ports::outbound::{EnvironmentInventory, MetadataResolver};
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The subset of a package's `info/index.json` that matters here
#[derive(Deserialize)]
struct IndexJson {
    #[serde(default)]
    depends: RawDependencies,
}

/// CondaMetadataReader adapter reading dependency metadata from disk
///
/// Native packages are looked up as `<pkgs_dir>/<dist_name>/info/index.json`
/// in every package cache, first hit wins. Index packages are looked up as
/// `<site-packages>/<name>-<version>.dist-info/METADATA` inside the
/// environment prefix.
pub struct CondaMetadataReader {
    pkgs_dirs: Vec<PathBuf>,
}

impl CondaMetadataReader {
    pub fn new(pkgs_dirs: Vec<PathBuf>) -> Self {
        Self { pkgs_dirs }
    }

    pub fn pkgs_dirs(&self) -> &[PathBuf] {
        &self.pkgs_dirs
    }

    fn read_native_metadata(&self, record: &RawPackageRecord) -> Result<Option<RawDependencies>> {
        if record.dist_name.is_empty() {
            return Ok(None);
        }

        for pkgs_dir in &self.pkgs_dirs {
            let index_path = pkgs_dir.join(&record.dist_name).join("info").join("index.json");
            if !index_path.is_file() {
                continue;
            }
            let content = safe_read_to_string(&index_path, "index.json")?;
            let index: IndexJson = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Failed to parse {}: {}", index_path.display(), e)
            })?;
            log::trace!("{} metadata from {}", record.name, index_path.display());
            return Ok(Some(index.depends));
        }
        Ok(None)
    }

    fn read_index_metadata(
        &self,
        inventory: &EnvironmentInventory,
        record: &RawPackageRecord,
    ) -> Result<Option<RawDependencies>> {
        let Some(prefix) = inventory.prefix.as_deref() else {
            return Ok(None);
        };
        let python_version = inventory
            .packages
            .iter()
            .find(|pkg| pkg.name.eq_ignore_ascii_case("python"))
            .map(|pkg| pkg.version.as_str());

        let Some(site_packages) = locate_site_packages(prefix, python_version) else {
            return Ok(None);
        };
        let Some(metadata_path) = find_dist_info_metadata(&site_packages, &record.name, &record.version)
        else {
            return Ok(None);
        };

        let content = safe_read_to_string(&metadata_path, "METADATA")?;
        Ok(Some(RawDependencies::List(parse_pypi_metadata(&content))))
    }
}

impl MetadataResolver for CondaMetadataReader {
    fn resolve_dependencies(
        &self,
        inventory: &EnvironmentInventory,
        record: &RawPackageRecord,
    ) -> Result<Option<RawDependencies>> {
        match record.origin() {
            PackageOrigin::Native => self.read_native_metadata(record),
            PackageOrigin::Index => self.read_index_metadata(inventory, record),
        }
    }
}

/// Finds the `site-packages` directory of an environment.
///
/// Tries `lib/python<X.Y.Z>`, `lib/python<X.Y>` and `lib/python<X>` for the
/// installed interpreter version, then the Windows layout `Lib/site-packages`.
pub fn locate_site_packages(prefix: &Path, python_version: Option<&str>) -> Option<PathBuf> {
    if let Some(version) = python_version {
        let parts: Vec<&str> = version.split('.').collect();
        for len in (1..=parts.len()).rev() {
            let candidate = prefix
                .join("lib")
                .join(format!("python{}", parts[..len].join(".")))
                .join("site-packages");
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
    }

    let windows = prefix.join("Lib").join("site-packages");
    windows.is_dir().then_some(windows)
}

/// Locates `<name>-<version>.dist-info/METADATA`, comparing names normalized
/// since installers write `-` and `.` in names as `_`.
pub fn find_dist_info_metadata(site_packages: &Path, name: &str, version: &str) -> Option<PathBuf> {
    let wanted = normalize_name(name);
    let entries = fs::read_dir(site_packages).ok()?;

    entries
        .filter_map(|entry| entry.ok())
        .find_map(|entry| {
            let file_name = entry.file_name();
            let stem = file_name.to_str()?.strip_suffix(".dist-info")?;
            let (dist_name, dist_version) = stem.rsplit_once('-')?;
            if dist_version != version || normalize_name(dist_name) != wanted {
                return None;
            }
            let metadata = entry.path().join("METADATA");
            metadata.is_file().then_some(metadata)
        })
}

/// Extracts requirement strings from the header block of a METADATA file.
///
/// `Requires-Python: >=3.8` becomes `python >=3.8`. `Requires-Dist` lines
/// are kept without their environment marker unless the marker restricts
/// them to an extra. Parsing stops at the first blank line, where the
/// description body starts.
pub fn parse_pypi_metadata(content: &str) -> Vec<String> {
    let mut requirements = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };

        match field.trim() {
            "Requires-Python" => {
                let spec: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                requirements.push(format!("python {}", spec));
            }
            "Requires-Dist" => {
                let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                if compact.contains("extra==") {
                    continue;
                }
                let requirement = value.split(';').next().unwrap_or_default();
                let requirement: String = requirement
                    .chars()
                    .filter(|c| *c != '(' && *c != ')')
                    .collect();
                let requirement = requirement.trim();
                if !requirement.is_empty() {
                    requirements.push(requirement.to_string());
                }
            }
            _ => {}
        }
    }

    requirements
}
