//! Error types for navmesh-probe

use std::fmt;
use std::io;

/// Result type for navmesh-probe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while probing the navmesh service
#[derive(Debug)]
pub enum Error {
    /// The request never produced a response (connect, TLS, body read)
    Transport(reqwest::Error),

    /// The service answered with a status other than 200
    Status { status: u16, body: String },

    /// The service answered 200 but the body is not the expected shape
    MalformedResponse(String),

    /// Settings could not be loaded
    Config(config::ConfigError),

    /// I/O error
    Io(io::Error),
}

impl Error {
    /// True for every failure of the restrict-to-navmesh call itself.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Status { .. } | Error::MalformedResponse(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "Request failed: {}", e),
            Error::Status { status, body } => {
                write!(f, "Request failed with status {}: {}", status, body)
            }
            Error::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Transport(error)
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Error::Config(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::MalformedResponse(error.to_string())
    }
}
