use crate::shared::Result;

/// ChannelConfigProvider port for reading the package manager's default channels
pub trait ChannelConfigProvider {
    /// Channel names configured as defaults, e.g. `pkgs/main`
    fn default_channels(&self) -> Result<Vec<String>>;
}
