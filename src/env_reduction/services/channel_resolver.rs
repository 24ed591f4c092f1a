use crate::env_reduction::domain::{Package, PackageOrigin};
use std::collections::BTreeSet;

/// Label that replaces first-party channel names in the output
pub const DEFAULTS_LABEL: &str = "defaults";

/// Channels published by the package manager vendor itself
///
/// Only these may be folded into `defaults`: another machine's default
/// channel list is not guaranteed to contain anything else.
pub const FIRST_PARTY_CHANNELS: [&str; 3] = ["pkgs/main", "pkgs/r", "pkgs/msys2"];

/// Computes the channel list of an exported environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResolver {
    default_channels: BTreeSet<String>,
}

impl ChannelResolver {
    /// Keeps only the configured defaults that are first-party channels.
    pub fn from_configured<S: AsRef<str>>(configured: &[S]) -> Self {
        let default_channels = configured
            .iter()
            .map(|c| c.as_ref().trim().trim_end_matches('/'))
            .filter(|c| FIRST_PARTY_CHANNELS.contains(c))
            .map(str::to_string)
            .collect();
        Self { default_channels }
    }

    /// Treats every first-party channel as a default channel.
    pub fn first_party() -> Self {
        Self::from_configured(&FIRST_PARTY_CHANNELS)
    }

    pub fn default_channels(&self) -> &BTreeSet<String> {
        &self.default_channels
    }

    pub fn to_default<'a>(&self, channel: &'a str) -> &'a str {
        if self.default_channels.contains(channel) {
            DEFAULTS_LABEL
        } else {
            channel
        }
    }

    /// Distinct channels of the native packages: `defaults` first, then the
    /// remaining names ascending.
    pub fn resolve<'a>(&self, packages: impl IntoIterator<Item = &'a Package>) -> Vec<String> {
        let channels: BTreeSet<&str> = packages
            .into_iter()
            .filter(|package| package.origin() == PackageOrigin::Native)
            .map(|package| self.to_default(package.channel()))
            .filter(|channel| !channel.is_empty())
            .collect();

        let mut ordered: Vec<String> = Vec::with_capacity(channels.len());
        if channels.contains(DEFAULTS_LABEL) {
            ordered.push(DEFAULTS_LABEL.to_string());
        }
        ordered.extend(
            channels
                .into_iter()
                .filter(|channel| *channel != DEFAULTS_LABEL)
                .map(str::to_string),
        );
        ordered
    }
}

impl Default for ChannelResolver {
    fn default() -> Self {
        Self::first_party()
    }
}
