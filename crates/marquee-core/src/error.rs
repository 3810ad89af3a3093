//! Error types for Marquee Core

use thiserror::Error;

/// Result type alias for lifecycle and session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Playback lifecycle error types
#[derive(Error, Debug)]
pub enum Error {
    // Source errors
    #[error("Cannot infer media format for {uri}: no recognizable suffix and no MIME hint")]
    MissingFormatHint { uri: String },

    #[error("Invalid source URI {uri}: {source}")]
    InvalidSourceUri {
        uri: String,
        source: url::ParseError,
    },

    #[error("No sources configured")]
    EmptyQueue,

    // Engine errors
    #[error("Engine construction failed: {0}")]
    EngineConstruction(String),

    #[error("Engine {op} failed: {message}")]
    Engine { op: &'static str, message: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an engine command error
    pub fn engine(op: &'static str, message: impl Into<String>) -> Self {
        Error::Engine {
            op,
            message: message.into(),
        }
    }
}
