//! conda-minify - minimized and relaxed specs for conda environments
//!
//! This library reads an installed conda environment, rebuilds the dependency
//! graph between its packages and exports either the smallest set of
//! top-level requirements that recreates it (`minify`) or every package with
//! loosened versions (`relax`). It follows a hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`env_reduction`): dependency graph, catalog and reduction services
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): conda, filesystem, console and formatter implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use conda_minify::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let inventory = SnapshotReader::new(PathBuf::from("env.json"));
//! let metadata = CondaMetadataReader::new(Vec::new());
//! let channels = FixedChannelConfig::new(vec!["pkgs/main".to_string()]);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ExportEnvironmentUseCase::new(inventory, metadata, channels, progress_reporter);
//!
//! // Execute
//! let request = ExportRequest::new(
//!     EnvironmentTarget::Active,
//!     ExportMethod::Minify(MinifyPolicy::default()),
//!     CyclePolicy::Ignore,
//! );
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! if let Some(spec) = response.environment() {
//!     println!("{}", YamlFormatter::new().format(spec)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod env_reduction;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::conda::{CondaCli, CondaMetadataReader, FixedChannelConfig};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, SnapshotReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
    pub use crate::application::dto::{
        ExportMethod, ExportOutput, ExportRequest, ExportResponse, OutputFormat,
    };
    pub use crate::application::use_cases::ExportEnvironmentUseCase;
    pub use crate::env_reduction::domain::{
        CyclePolicy, DependencyGraph, EnvironmentSpec, Package, PackageCatalog,
        RawPackageRecord, VersionPolicy,
    };
    pub use crate::env_reduction::services::{MinifyPolicy, RelaxPolicy};
    pub use crate::ports::outbound::{
        ChannelConfigProvider, EnvironmentFormatter, EnvironmentTarget, InventoryProvider,
        MetadataResolver, OutputPresenter, ProgressReporter,
    };
    pub use crate::shared::error::{EnvError, ReductionError};
    pub use crate::shared::Result;
}
