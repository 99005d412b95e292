use std::fmt;

/// Result type for convlog-journal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the journal layer
#[derive(Debug)]
pub enum Error {
    /// An agent or session id cannot be used as a path component
    InvalidId(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidId(id) => write!(f, "Invalid id for journal path: {:?}", id),
        }
    }
}

impl std::error::Error for Error {}
