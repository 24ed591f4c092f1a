mod channel_resolver;
mod minifier;
mod relaxer;
mod requirement_builder;

pub use channel_resolver::{ChannelResolver, DEFAULTS_LABEL, FIRST_PARTY_CHANNELS};
pub use minifier::{Minifier, MinifyPolicy};
pub use relaxer::{RelaxPolicy, Relaxer};
pub use requirement_builder::RequirementBuilder;
