use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Channel name conda reports for packages installed with pip.
pub const PYPI_CHANNEL: &str = "pypi";

/// Normalizes a package name into the key used for lookups and graph nodes.
///
/// Lower-cases the name and maps `-` and `.` to `_`, so `Python-Dateutil`,
/// `python.dateutil` and `python_dateutil` share one key.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '.' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Where an installed package came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageOrigin {
    /// Installed by the package manager from one of its channels
    Native,
    /// Installed from the Python package index inside the environment
    Index,
}

impl PackageOrigin {
    pub fn from_channel(channel: &str) -> Self {
        if channel == PYPI_CHANNEL {
            PackageOrigin::Index
        } else {
            PackageOrigin::Native
        }
    }
}

/// Declared dependencies as the inventory or a metadata file reports them.
///
/// `conda list` metadata uses a list of `"<name> <constraint>"` strings, while
/// some sources already give a `name -> constraint` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDependencies {
    List(Vec<String>),
    Mapping(BTreeMap<String, String>),
}

impl Default for RawDependencies {
    fn default() -> Self {
        RawDependencies::List(Vec::new())
    }
}

impl RawDependencies {
    /// Folds either shape into `{normalized_name: constraint}`.
    ///
    /// For list entries the name ends at the first character that cannot be
    /// part of a package name; an extras suffix (`pkg[extra]`) is dropped.
    /// The first occurrence of a name wins.
    pub fn normalize(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        match self {
            RawDependencies::List(entries) => {
                for entry in entries {
                    let Some((name, constraint)) = split_requirement(entry) else {
                        continue;
                    };
                    out.entry(normalize_name(name))
                        .or_insert_with(|| constraint.to_string());
                }
            }
            RawDependencies::Mapping(map) => {
                for (name, constraint) in map {
                    let name = name.trim();
                    if name.is_empty() {
                        continue;
                    }
                    out.entry(normalize_name(name))
                        .or_insert_with(|| constraint.trim().to_string());
                }
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawDependencies::List(entries) => entries.is_empty(),
            RawDependencies::Mapping(map) => map.is_empty(),
        }
    }
}

/// Splits `"numpy >=1.21,<2"`, `"numpy>=1.21"` or `"requests[socks] >=2"`
/// into the bare name and the trimmed constraint.
fn split_requirement(entry: &str) -> Option<(&str, &str)> {
    let entry = entry.trim();
    let name_end = entry
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .unwrap_or(entry.len());
    let name = &entry[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut rest = &entry[name_end..];
    if rest.starts_with('[') {
        rest = match rest.find(']') {
            Some(close) => &rest[close + 1..],
            None => "",
        };
    }
    Some((name, rest.trim()))
}

/// One package record as reported by the inventory provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPackageRecord {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub build_string: String,
    #[serde(default)]
    pub channel: String,
    /// Manager-specific distribution identifier, e.g. `numpy-1.26.0-py311h64a7726_0`
    #[serde(default)]
    pub dist_name: String,
    /// Present when the inventory already carries dependency metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends: Option<RawDependencies>,
}

impl RawPackageRecord {
    pub fn new(name: &str, version: &str, build_string: &str, channel: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            build_string: build_string.to_string(),
            channel: channel.to_string(),
            dist_name: format!("{}-{}-{}", name, version, build_string),
            depends: None,
        }
    }

    pub fn with_depends(mut self, depends: RawDependencies) -> Self {
        self.depends = Some(depends);
        self
    }

    pub fn origin(&self) -> PackageOrigin {
        PackageOrigin::from_channel(&self.channel)
    }
}

/// Package entity holding the normalized metadata of one installed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    canonical_name: String,
    normalized_key: String,
    version: String,
    build: String,
    channel: String,
    dependencies: BTreeMap<String, String>,
}

impl Package {
    pub fn new(
        canonical_name: String,
        version: String,
        build: String,
        channel: String,
        dependencies: BTreeMap<String, String>,
    ) -> Self {
        let normalized_key = normalize_name(&canonical_name);
        Self {
            canonical_name,
            normalized_key,
            version,
            build,
            channel,
            dependencies,
        }
    }

    /// Builds a package from an inventory record and its resolved dependencies.
    pub fn from_record(record: &RawPackageRecord, depends: &RawDependencies) -> Self {
        Self::new(
            record.name.clone(),
            record.version.clone(),
            record.build_string.clone(),
            record.channel.clone(),
            depends.normalize(),
        )
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn normalized_key(&self) -> &str {
        &self.normalized_key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn dependencies(&self) -> &BTreeMap<String, String> {
        &self.dependencies
    }

    pub fn origin(&self) -> PackageOrigin {
        PackageOrigin::from_channel(&self.channel)
    }
}
