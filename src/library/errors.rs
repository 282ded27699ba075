use thiserror::Error;

/// Failures surfaced to callers. Not-found and malformed lines are not errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("No songs available to play")]
    EmptyCatalog,

    #[error("Playback session has already been stopped")]
    SessionStopped,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Why a stored line could not be turned into a song
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid {field} {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
