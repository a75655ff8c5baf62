//! Error types for result-set operations.
//!
//! Access operations on collections never fail; absent keys resolve to
//! `None`. Errors only surface at the edges: decoding a raw payload,
//! typed extraction of a column value, and reading configuration.

use std::fmt;

/// The primary error type for all ormcollect operations.
#[derive(Debug)]
pub enum Error {
    /// Type conversion errors
    Type(TypeError),
    /// Raw payload could not be shaped into a collection
    Payload(PayloadError),
    /// Configuration errors
    Config(ConfigError),
    /// Serialization/deserialization errors
    Serde(String),
    /// Custom error with message
    Custom(String),
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

#[derive(Debug)]
pub struct PayloadError {
    pub kind: PayloadErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadErrorKind {
    /// A paginated fetch did not produce a `{data, pagination}` envelope
    MalformedEnvelope,
    /// A row was not a column mapping
    InvalidRow,
    /// The pagination half of an envelope could not be decoded
    InvalidPagination,
}

#[derive(Debug)]
pub struct ConfigError {
    /// Setting (or environment variable) that was rejected
    pub key: String,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Build a payload error.
    pub fn payload(kind: PayloadErrorKind, message: impl Into<String>) -> Self {
        Error::Payload(PayloadError {
            kind,
            message: message.into(),
        })
    }

    /// Build a configuration error for `key`.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config(ConfigError {
            key: key.into(),
            message: message.into(),
            source: None,
        })
    }

    /// Is this a malformed pagination envelope?
    pub fn is_malformed_envelope(&self) -> bool {
        matches!(
            self,
            Error::Payload(PayloadError {
                kind: PayloadErrorKind::MalformedEnvelope,
                ..
            })
        )
    }

    /// Payload error kind, if this is a payload error.
    pub fn payload_kind(&self) -> Option<PayloadErrorKind> {
        match self {
            Error::Payload(p) => Some(p.kind),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
            Error::Payload(e) => write!(f, "Payload error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Serde(msg) => write!(f, "Serialization error: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = &self.column {
            write!(
                f,
                "expected {} for column '{}', found {}",
                self.expected, col, self.actual
            )
        } else {
            write!(f, "expected {}, found {}", self.expected, self.actual)
        }
    }
}

impl fmt::Display for PayloadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PayloadErrorKind::MalformedEnvelope => "malformed pagination envelope",
            PayloadErrorKind::InvalidRow => "invalid row",
            PayloadErrorKind::InvalidPagination => "invalid pagination metadata",
        })
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

impl From<PayloadError> for Error {
    fn from(err: PayloadError) -> Self {
        Error::Payload(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err.to_string())
    }
}

/// Result type alias for ormcollect operations.
pub type Result<T> = std::result::Result<T, Error>;
