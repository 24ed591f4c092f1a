/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod conda;
pub mod console;
pub mod filesystem;
pub mod formatters;
