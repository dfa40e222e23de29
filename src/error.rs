use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation engine and its collaborators.
///
/// Physical non-events (no collision, stale events, drift repairs) are never
/// reported through this type; they are sentinels, counters and log lines.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The initial configuration could not be generated without overlaps.
    #[error("placement failed: {0}")]
    Placement(String),

    /// Propagated I/O errors from snapshot sinks and config files.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
