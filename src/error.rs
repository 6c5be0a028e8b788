use thiserror::Error as ThisError;

/// Errors that can occur in the logging facade
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Structured data could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Unknown level name.
    #[error("Unknown log level: {0}")]
    Level(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
