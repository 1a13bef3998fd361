//! Error types for wavkit

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wavkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavkit
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be opened or created
    #[error("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO error while reading or writing a stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Header parse error (bad magic, truncated file, malformed chunk)
    #[error("Format error: {0}")]
    Format(String),

    /// Unsupported format or feature
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl Error {
    /// Create an open error for the given path
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create an unsupported error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Numeric result code matching the classic C API:
    /// -2 open failure, -3 header parse failure, -4 unsupported format.
    pub fn code(&self) -> i32 {
        match self {
            Error::Open { .. } => -2,
            Error::Io(_) | Error::Format(_) => -3,
            Error::Unsupported(_) => -4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let open = Error::open("nope.wav", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(open.code(), -2);
        assert_eq!(Error::format("bad magic").code(), -3);
        assert_eq!(
            Error::from(io::Error::from(io::ErrorKind::UnexpectedEof)).code(),
            -3
        );
        assert_eq!(Error::unsupported("stereo").code(), -4);
    }

    #[test]
    fn test_open_error_names_path() {
        let err = Error::open("missing.wav", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("missing.wav"));
    }
}
