use std::fmt::Display;
use std::io;
use thiserror::Error;

/// A netscout error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A boxed underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A netscout error.
///
/// Every variant belongs to exactly one [`ErrorKind`], and re-labelling an error with
/// [`Error::context`] never changes its kind.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("protocol failure: {message}")]
    ProtocolFailure {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    #[error("resource disposed: {0}")]
    ResourceDisposed(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("unexpected error: {message}")]
    Other {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

/// The closed set of error kinds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// An empty hostname or a malformed address.
    InvalidInput,
    /// A timeout, time-to-live or port outside its permitted bounds.
    OutOfRange,
    /// The ICMP or DNS exchange could not complete for a reason other than a timeout.
    ProtocolFailure,
    /// A probing resource was used after it was released.
    ResourceLifecycle,
    /// The operation was cancelled by the caller.
    Cancelled,
    /// Any other failure.
    Unclassified,
}

impl Error {
    /// Create a `ProtocolFailure` with an underlying cause.
    pub fn protocol<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::ProtocolFailure {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an unclassified error without an underlying cause.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            source: None,
        }
    }

    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::ProtocolFailure { .. } => ErrorKind::ProtocolFailure,
            Self::ResourceDisposed(_) => ErrorKind::ResourceLifecycle,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Other { .. } => ErrorKind::Unclassified,
        }
    }

    /// Prefix the error message with `context`, keeping the kind and cause.
    #[must_use]
    pub fn context(self, context: impl Display) -> Self {
        match self {
            Self::InvalidInput(msg) => Self::InvalidInput(format!("{context}: {msg}")),
            Self::OutOfRange(msg) => Self::OutOfRange(format!("{context}: {msg}")),
            Self::ProtocolFailure { message, source } => Self::ProtocolFailure {
                message: format!("{context}: {message}"),
                source,
            },
            Self::ResourceDisposed(msg) => Self::ResourceDisposed(format!("{context}: {msg}")),
            Self::Cancelled => Self::Cancelled,
            Self::Other { message, source } => Self::Other {
                message: format!("{context}: {message}"),
                source,
            },
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidInput => Self::InvalidInput(err.to_string()),
            io::ErrorKind::NotFound
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::AddrNotAvailable => Self::ProtocolFailure {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
            _ => Self::Other {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
        }
    }
}
