//! Error types for persistmap.

use std::fmt;

/// The main error type for persistmap operations.
#[derive(Debug)]
pub enum Error {
    /// A required argument was missing or empty (e.g. an empty backing path)
    InvalidArgument(String),

    /// Direct lookup of a key that is not in the map
    KeyNotFound,

    /// The backing file exists but its contents could not be decoded
    Decode(String),

    /// The in-memory map could not be serialized
    Encode(String),

    /// I/O error while reading, writing, syncing or replacing the backing file
    Io(std::io::Error),
}

impl Error {
    /// Returns `true` if this error means memory and disk may have diverged.
    ///
    /// Only failures raised while persisting a mutation fall in this class.
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Encode(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::KeyNotFound => write!(f, "Key not found"),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Encode(msg) => write!(f, "Encode error: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for persistmap operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display() {
        assert_eq!(Error::KeyNotFound.to_string(), "Key not found");
        assert_eq!(
            Error::InvalidArgument("path is empty".into()).to_string(),
            "Invalid argument: path is empty"
        );
        assert_eq!(
            Error::Decode("bad magic".into()).to_string(),
            "Decode error: bad magic"
        );
    }

    #[test]
    fn test_io_source() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
        assert!(Error::KeyNotFound.source().is_none());
    }

    #[test]
    fn test_persist_failure_class() {
        let io = Error::Io(std::io::Error::other("disk full"));
        assert!(io.is_persist_failure());
        assert!(Error::Encode("x".into()).is_persist_failure());
        assert!(!Error::KeyNotFound.is_persist_failure());
        assert!(!Error::Decode("x".into()).is_persist_failure());
    }
}
