/// Result alias used by the application layer, ports and adapters.
///
/// The graph and reduction core return `ReductionError` directly; it converts
/// into `anyhow::Error` with `?` at the use-case boundary.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
