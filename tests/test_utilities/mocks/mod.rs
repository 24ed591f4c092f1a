/// Mock implementations for testing
mod mock_channel_config;
mod mock_inventory_provider;
mod mock_metadata_resolver;
mod mock_progress_reporter;

pub use mock_channel_config::MockChannelConfig;
pub use mock_inventory_provider::MockInventoryProvider;
pub use mock_metadata_resolver::MockMetadataResolver;
pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
