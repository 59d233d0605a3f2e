/// Result alias used by the application and adapter layers.
/// Domain failures are `GraphError` values wrapped in `anyhow::Error`,
/// so callers can still `downcast_ref` them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
