use conda_minify::prelude::*;

/// Mock ChannelConfigProvider
pub struct MockChannelConfig {
    channels: Option<Vec<String>>,
}

impl MockChannelConfig {
    pub fn new(channels: &[&str]) -> Self {
        Self {
            channels: Some(channels.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// A configuration that cannot be read
    pub fn failing() -> Self {
        Self { channels: None }
    }
}

impl ChannelConfigProvider for MockChannelConfig {
    fn default_channels(&self) -> Result<Vec<String>> {
        self.channels
            .clone()
            .ok_or_else(|| anyhow::anyhow!("conda config --show default_channels failed"))
    }
}
