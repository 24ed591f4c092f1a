use crate::shared::error::ReductionError;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

const ALLOWED_VALUES: &str = "full, major, minor, none";

/// How much of an installed version ends up in a requirement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionPolicy {
    /// Exact version (`1.26.4`)
    #[default]
    Full,
    /// Major release only (`1.*`)
    Major,
    /// Major and minor release (`1.26.*`)
    Minor,
    /// No version at all
    None,
}

impl VersionPolicy {
    /// Whether requirement lines carry a version field under this policy
    pub fn includes_version(self) -> bool {
        self != VersionPolicy::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VersionPolicy::Full => "full",
            VersionPolicy::Major => "major",
            VersionPolicy::Minor => "minor",
            VersionPolicy::None => "none",
        }
    }
}

impl FromStr for VersionPolicy {
    type Err = ReductionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "true" => Ok(VersionPolicy::Full),
            "major" => Ok(VersionPolicy::Major),
            "minor" => Ok(VersionPolicy::Minor),
            "none" | "false" => Ok(VersionPolicy::None),
            _ => Err(ReductionError::InvalidArgument {
                argument: "how".to_string(),
                value: s.to_string(),
                allowed: ALLOWED_VALUES.to_string(),
            }),
        }
    }
}

impl fmt::Display for VersionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VersionPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Loosens `version` according to `how`.
///
/// Versions without a `.` are returned unchanged, as is every version under
/// `Full` and `None` (the requirement template drops the field for `None`).
pub fn format_version(version: &str, how: VersionPolicy) -> String {
    if how == VersionPolicy::Full || !version.contains('.') {
        return version.to_string();
    }

    let mut parts = version.splitn(3, '.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    let subs = parts.next().unwrap_or_default();

    match how {
        VersionPolicy::Major => format!("{}.*", major),
        VersionPolicy::Minor if subs.is_empty() => format!("{}.{}", major, minor),
        VersionPolicy::Minor => format!("{}.{}.*", major, minor),
        VersionPolicy::Full | VersionPolicy::None => version.to_string(),
    }
}

/// String-mode entry point: parses `how` first, so an unknown mode fails
/// with `InvalidArgument` before anything is formatted.
pub fn format_version_str(version: &str, how: &str) -> Result<String, ReductionError> {
    let how = how.parse::<VersionPolicy>()?;
    Ok(format_version(version, how))
}
