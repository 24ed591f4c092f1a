use crate::ports::outbound::ChannelConfigProvider;
use crate::shared::Result;

/// Default channels given up front instead of asking conda
///
/// Used with snapshots and when the config file lists `default_channels`.
#[derive(Debug, Clone, Default)]
pub struct FixedChannelConfig {
    channels: Vec<String>,
}

impl FixedChannelConfig {
    pub fn new(channels: Vec<String>) -> Self {
        Self { channels }
    }
}

impl ChannelConfigProvider for FixedChannelConfig {
    fn default_channels(&self) -> Result<Vec<String>> {
        Ok(self.channels.clone())
    }
}
