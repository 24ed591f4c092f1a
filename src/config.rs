//! Configuration file support for conda-minify.
//!
//! Provides YAML-based configuration through `conda-minify.config.yml` files,
//! including data structures, file loading, and validation. Values given on
//! the command line take precedence over the file.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::env_reduction::domain::{CyclePolicy, VersionPolicy};
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "conda-minify.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub cycle_policy: Option<String>,
    /// Stand-in for `conda config --show default_channels`
    pub default_channels: Option<Vec<String>>,
    /// Package caches searched for `info/index.json`
    pub pkgs_dirs: Option<Vec<PathBuf>>,
    pub minify: Option<MinifySection>,
    pub relax: Option<RelaxSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Defaults for the `minify` subcommand.
#[derive(Debug, Deserialize, Default)]
pub struct MinifySection {
    pub how: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub add_exclusion_deps: Option<bool>,
    pub add_builds: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Defaults for the `relax` subcommand.
#[derive(Debug, Deserialize, Default)]
pub struct RelaxSection {
    pub how: Option<String>,
    pub pin: Option<Vec<String>>,
    /// Package name to `how` value
    pub overrides: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|value| value.parse::<OutputFormat>().map_err(anyhow::Error::msg))
            .transpose()
    }

    pub fn cycle_policy(&self) -> Result<Option<CyclePolicy>> {
        Ok(self
            .cycle_policy
            .as_deref()
            .map(str::parse::<CyclePolicy>)
            .transpose()?)
    }
}

impl MinifySection {
    pub fn how(&self) -> Result<Option<VersionPolicy>> {
        parse_how(self.how.as_deref())
    }
}

impl RelaxSection {
    pub fn how(&self) -> Result<Option<VersionPolicy>> {
        parse_how(self.how.as_deref())
    }

    /// Overrides in package-name order.
    pub fn overrides(&self) -> Result<Vec<(String, VersionPolicy)>> {
        let Some(overrides) = &self.overrides else {
            return Ok(Vec::new());
        };
        overrides
            .iter()
            .map(|(package, how)| -> Result<(String, VersionPolicy)> {
                Ok((package.clone(), how.parse()?))
            })
            .collect()
    }
}

fn parse_how(value: Option<&str>) -> Result<Option<VersionPolicy>> {
    Ok(value.map(str::parse::<VersionPolicy>).transpose()?)
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = safe_read_to_string(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
///
/// Bad `how` and `cycle_policy` values surface as `ReductionError::InvalidArgument`.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.output_format()?;
    config.cycle_policy()?;

    if let Some(minify) = &config.minify {
        minify.how()?;
    }
    if let Some(relax) = &config.relax {
        relax.how()?;
        relax.overrides()?;
    }

    if let Some(dirs) = &config.pkgs_dirs {
        if dirs.iter().any(|dir| dir.as_os_str().is_empty()) {
            bail!("Invalid config: pkgs_dirs entries must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let nested = config
        .minify
        .iter()
        .flat_map(|m| m.unknown_fields.keys().map(|k| format!("minify.{}", k)))
        .chain(
            config
                .relax
                .iter()
                .flat_map(|r| r.unknown_fields.keys().map(|k| format!("relax.{}", k))),
        );

    for key in config.unknown_fields.keys().cloned().chain(nested) {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
