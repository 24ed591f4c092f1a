use crate::env_reduction::domain::RawPackageRecord;
use crate::ports::outbound::{
    ChannelConfigProvider, EnvironmentInventory, EnvironmentTarget, InventoryProvider,
};
use crate::shared::error::EnvError;
use crate::shared::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

const LIST_HEADER: &str = "# packages in environment at";

/// Markers conda prints when the requested environment does not exist
const MISSING_ENVIRONMENT_MARKERS: [&str; 3] = [
    "EnvironmentLocationNotFound",
    "Not a conda environment",
    "Could not find conda environment",
];

/// CondaCli adapter talking to the `conda` executable
///
/// Implements the InventoryProvider and ChannelConfigProvider ports. The
/// executable is taken from `CONDA_EXE` when set, so the adapter also works
/// from shells where `conda` is only a shell function.
#[derive(Debug, Clone)]
pub struct CondaCli {
    executable: PathBuf,
}

impl CondaCli {
    pub fn new() -> Self {
        let executable = std::env::var_os("CONDA_EXE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("conda"));
        Self::with_executable(executable)
    }

    pub fn with_executable(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Package cache directories (`pkgs_dirs`) from the conda configuration
    pub fn pkgs_dirs(&self) -> Result<Vec<PathBuf>> {
        let output = self.run(&["config", "--show", "pkgs_dirs", "--json"])?;
        parse_pkgs_dirs(&output)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.executable.display(), args.join(" "));
        log::debug!("Running {}", command);

        let output = Command::new(&self.executable)
            .args(args)
            .output()
            .map_err(|e| EnvError::CondaCommandFailed {
                command: command.clone(),
                details: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(EnvError::CondaCommandFailed {
            command,
            details: if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            },
        }
        .into())
    }

    /// Resolves the prefix of `target` from the header of `conda list`.
    fn resolve_prefix(&self, target: &EnvironmentTarget) -> Result<PathBuf> {
        let (flag, value) = match target {
            EnvironmentTarget::Active => {
                let prefix = std::env::var_os("CONDA_PREFIX").ok_or_else(|| {
                    EnvError::EnvironmentNotFound {
                        target: "active environment (CONDA_PREFIX is not set)".to_string(),
                    }
                })?;
                ("-p", PathBuf::from(prefix).display().to_string())
            }
            EnvironmentTarget::Name(name) => ("-n", name.clone()),
            EnvironmentTarget::Path(path) => ("-p", path.display().to_string()),
        };

        let listing = self
            .run(&["list", flag, &value])
            .map_err(|e| missing_environment_or(e, target))?;

        parse_list_header(&listing).ok_or_else(|| {
            EnvError::CondaCommandFailed {
                command: format!("conda list {} {}", flag, value),
                details: "output did not start with the environment header".to_string(),
            }
            .into()
        })
    }
}

impl Default for CondaCli {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryProvider for CondaCli {
    fn read_inventory(&self, target: &EnvironmentTarget) -> Result<EnvironmentInventory> {
        let prefix = self.resolve_prefix(target)?;
        let prefix_arg = prefix.display().to_string();

        let listing = self
            .run(&["list", "-p", &prefix_arg, "--json"])
            .map_err(|e| missing_environment_or(e, target))?;
        let packages: Vec<RawPackageRecord> = serde_json::from_str(&listing).map_err(|e| {
            if is_missing_environment(&listing) {
                EnvError::EnvironmentNotFound {
                    target: target.to_string(),
                }
            } else {
                EnvError::CondaCommandFailed {
                    command: format!("conda list -p {} --json", prefix_arg),
                    details: format!("unexpected output: {}", e),
                }
            }
        })?;

        let name = match target {
            EnvironmentTarget::Name(name) => name.clone(),
            _ => environment_name_from_prefix(&prefix),
        };
        log::info!("Read {} packages from {}", packages.len(), prefix.display());

        Ok(EnvironmentInventory::new(name, Some(prefix), packages))
    }
}

impl ChannelConfigProvider for CondaCli {
    fn default_channels(&self) -> Result<Vec<String>> {
        let output = self.run(&["config", "--show", "default_channels", "--json"])?;
        parse_default_channels(&output)
    }
}

fn is_missing_environment(text: &str) -> bool {
    MISSING_ENVIRONMENT_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

/// Turns a failed conda call into `EnvironmentNotFound` when conda said so.
fn missing_environment_or(error: anyhow::Error, target: &EnvironmentTarget) -> anyhow::Error {
    if is_missing_environment(&error.to_string()) {
        EnvError::EnvironmentNotFound {
            target: target.to_string(),
        }
        .into()
    } else {
        error
    }
}

/// Extracts the prefix from `# packages in environment at <path>:`.
pub fn parse_list_header(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(LIST_HEADER))
        .map(|rest| rest.trim().trim_end_matches(':').trim())
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

pub fn environment_name_from_prefix(prefix: &Path) -> String {
    prefix
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| prefix.display().to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChannelEntry {
    Name(String),
    Detailed { name: String },
}

#[derive(Deserialize)]
struct DefaultChannels {
    #[serde(default)]
    default_channels: Vec<ChannelEntry>,
}

#[derive(Deserialize)]
struct PkgsDirs {
    #[serde(default)]
    pkgs_dirs: Vec<PathBuf>,
}

/// Parses `conda config --show default_channels --json`.
///
/// Entries are either channel objects with a `name` or plain URLs; URLs are
/// cut down to their `pkgs/...` part.
pub fn parse_default_channels(json: &str) -> Result<Vec<String>> {
    let parsed: DefaultChannels = serde_json::from_str(json)
        .map_err(|e| anyhow::anyhow!("Failed to parse conda default_channels: {}", e))?;

    Ok(parsed
        .default_channels
        .into_iter()
        .map(|entry| match entry {
            ChannelEntry::Name(raw) | ChannelEntry::Detailed { name: raw } => raw,
        })
        .map(|raw| match raw.find("pkgs/") {
            Some(start) => raw[start..].trim_end_matches('/').to_string(),
            None => raw,
        })
        .collect())
}

/// Parses `conda config --show pkgs_dirs --json`.
pub fn parse_pkgs_dirs(json: &str) -> Result<Vec<PathBuf>> {
    let parsed: PkgsDirs = serde_json::from_str(json)
        .map_err(|e| anyhow::anyhow!("Failed to parse conda pkgs_dirs: {}", e))?;
    Ok(parsed.pkgs_dirs)
}
