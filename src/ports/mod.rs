/// Ports module defining interfaces for hexagonal architecture
///
/// The application core drives every external system through the outbound
/// (driven) ports; the CLI calls the use case directly.
pub mod outbound;
