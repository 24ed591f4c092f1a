use clap::{Parser, Subcommand};
use std::path::PathBuf;

use conda_minify::application::dto::{ExportMethod, OutputFormat};
use conda_minify::config::ConfigFile;
use conda_minify::env_reduction::domain::{CyclePolicy, VersionPolicy, DEFAULT_TREE_DEPTH};
use conda_minify::env_reduction::services::{MinifyPolicy, RelaxPolicy};
use conda_minify::ports::outbound::EnvironmentTarget;
use conda_minify::shared::Result;

const EXAMPLES: &str = "\
Examples:
  Export a minified spec of myenv to a file:
      conda-minify -n myenv minify -f path/to/env.yml
  Exclude pandas and matplotlib, loosen versions to the major release:
      conda-minify -n myenv minify -e pandas -e matplotlib --how major
  Relax every version to minor, keep numpy and pandas pinned:
      conda-minify -n myenv relax --how minor -p numpy -p pandas
  Relax to major but keep pandas at minor:
      conda-minify -n myenv relax --how major -o pandas minor
  Show what pandas pulls in:
      conda-minify -n myenv tree pandas";

/// Build minimized or relaxed specs to share conda environments
#[derive(Parser, Debug)]
#[command(name = "conda-minify")]
#[command(version)]
#[command(about = "Builds minimized conda specs to share environments", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Environment to export; a '/' or '\' makes it a path (defaults to the active environment)
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Read the environment from a `conda list --json` snapshot instead of running conda
    #[arg(long, global = true, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format: yaml or json
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to ./conda-minify.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do with a dependency that would close a cycle: ignore or raise
    #[arg(long, global = true, value_name = "POLICY")]
    pub cycle_policy: Option<CyclePolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export only the top-level packages needed to recreate the environment
    Minify {
        /// How versions are written: full, major ('1.*'), minor ('1.11.*') or none [default: full]
        #[arg(long)]
        how: Option<VersionPolicy>,

        /// Additional packages to include. Can be passed multiple times: -i pkg1 -i pkg2
        #[arg(short, long = "include", value_name = "PACKAGE")]
        include: Vec<String>,

        /// Packages to exclude. Can be passed multiple times: -e pkg1 -e pkg2
        #[arg(short, long = "exclude", value_name = "PACKAGE")]
        exclude: Vec<String>,

        /// Add the direct dependencies of excluded packages to the spec
        #[arg(long, alias = "add_exclusion_deps")]
        add_exclusion_deps: bool,

        /// Add the build string to every requirement
        #[arg(long, alias = "add_builds")]
        add_builds: bool,
    },

    /// Export every package with relaxed version numbers
    Relax {
        /// Default for how versions are written; --pin and --override take precedence [default: minor]
        #[arg(long)]
        how: Option<VersionPolicy>,

        /// Keep the full installed version of a package. Can be passed multiple times
        #[arg(short, long = "pin", value_name = "PACKAGE")]
        pin: Vec<String>,

        /// Override `how` for one package: -o pandas full
        #[arg(
            short = 'o',
            long = "override",
            num_args = 2,
            value_names = ["PACKAGE", "HOW"]
        )]
        overrides: Vec<String>,
    },

    /// Print the leveled dependency tree of one package
    Tree {
        /// Installed package to inspect
        package: String,

        /// Deepest level to descend to
        #[arg(long, default_value_t = DEFAULT_TREE_DEPTH)]
        max_depth: usize,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn target(&self) -> EnvironmentTarget {
        self.name
            .as_deref()
            .map_or(EnvironmentTarget::Active, EnvironmentTarget::parse)
    }
}

impl Command {
    /// Merges the subcommand options with the config file defaults.
    ///
    /// Scalars given on the command line win; list options replace the
    /// config lists when non-empty.
    pub fn into_method(self, config: Option<&ConfigFile>) -> Result<ExportMethod> {
        match self {
            Command::Minify {
                how,
                include,
                exclude,
                add_exclusion_deps,
                add_builds,
            } => {
                let section = config.and_then(|c| c.minify.as_ref());
                let config_how = section.map(|s| s.how()).transpose()?.flatten();

                Ok(ExportMethod::Minify(MinifyPolicy {
                    include: or_config(include, section.and_then(|s| s.include.as_ref())),
                    exclude: or_config(exclude, section.and_then(|s| s.exclude.as_ref())),
                    add_exclusion_deps: add_exclusion_deps
                        || section.and_then(|s| s.add_exclusion_deps).unwrap_or(false),
                    how: how.or(config_how).unwrap_or(VersionPolicy::Full),
                    add_builds: add_builds || section.and_then(|s| s.add_builds).unwrap_or(false),
                }))
            }
            Command::Relax {
                how,
                pin,
                overrides,
            } => {
                let section = config.and_then(|c| c.relax.as_ref());
                let config_how = section.map(|s| s.how()).transpose()?.flatten();

                let overrides = if overrides.is_empty() {
                    section.map(|s| s.overrides()).transpose()?.unwrap_or_default()
                } else {
                    parse_overrides(&overrides)?
                };

                Ok(ExportMethod::Relax(RelaxPolicy {
                    how: how.or(config_how).unwrap_or(VersionPolicy::Minor),
                    pin: or_config(pin, section.and_then(|s| s.pin.as_ref())),
                    overrides,
                }))
            }
            Command::Tree { package, max_depth } => Ok(ExportMethod::Tree { package, max_depth }),
        }
    }
}

fn or_config(cli: Vec<String>, config: Option<&Vec<String>>) -> Vec<String> {
    if cli.is_empty() {
        config.cloned().unwrap_or_default()
    } else {
        cli
    }
}

/// `-o` values arrive flattened as `[package, how, package, how, ...]`.
fn parse_overrides(values: &[String]) -> Result<Vec<(String, VersionPolicy)>> {
    values
        .chunks(2)
        .map(|pair| -> Result<(String, VersionPolicy)> {
            match pair {
                [package, how] => Ok((package.clone(), how.parse()?)),
                _ => anyhow::bail!("--override takes a package name and a `how` value"),
            }
        })
        .collect()
}
