//! Configuration and wiring errors.

use thiserror::Error;

/// Errors raised while assembling the session core.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required collaborator was not supplied to a builder.
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),

    /// The home directory could not be determined and no data dir was set.
    #[error("Could not determine a data directory; set SPLITPAY_DATA_DIR")]
    NoDataDir,

    /// An environment variable held an unusable value.
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    /// The HTTP transport could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Http(String),
}
