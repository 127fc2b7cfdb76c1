use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("config file is missing: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("config file is empty")]
    EmptyConfig,

    #[error("config file has incorrect version {found:?}, expected {expected:?}")]
    InvalidVersion { found: String, expected: &'static str },

    #[error("max_responses must be positive, got {0}")]
    InvalidMaxResponses(i64),

    #[error("files must be an array of paths")]
    MalformedFiles,

    #[error("requests file is missing: {}", .0.display())]
    MissingRequests(PathBuf),

    #[error("requests must be an array of strings")]
    MalformedRequests,

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConverterError>;
