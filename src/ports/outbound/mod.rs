/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (package manager, file system, console).
pub mod channel_config_provider;
pub mod formatter;
pub mod inventory_provider;
pub mod metadata_resolver;
pub mod output_presenter;
pub mod progress_reporter;

pub use channel_config_provider::ChannelConfigProvider;
pub use formatter::EnvironmentFormatter;
pub use inventory_provider::{EnvironmentInventory, EnvironmentTarget, InventoryProvider};
pub use metadata_resolver::MetadataResolver;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
