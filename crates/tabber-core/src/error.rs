//! Unified application error types for Tabber.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Tree and account failures keep their
//! precise [`ErrorKind`] all the way to the boundary layer, which decides how
//! much of it a client gets to see.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A path had an empty segment, or a name contained the separator.
    MalformedPath,
    /// A path segment (ancestor or target) does not exist.
    NotFound,
    /// A path segment resolved to a node of the wrong kind.
    WrongType,
    /// A sibling with the requested name already exists.
    AlreadyExists,
    /// A non-cascading delete was attempted on a populated folder.
    NotEmpty,
    /// The operation is never allowed (e.g. deleting the root folder).
    Forbidden,
    /// Registration with an email that is already in use.
    EmailTaken,
    /// Authentication failed. Never says which half was wrong.
    InvalidCredentials,
    /// Input validation failed.
    Validation,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPath => write!(f, "MALFORMED_PATH"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::WrongType => write!(f, "WRONG_TYPE"),
            Self::AlreadyExists => write!(f, "ALREADY_EXISTS"),
            Self::NotEmpty => write!(f, "NOT_EMPTY"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::EmailTaken => write!(f, "EMAIL_TAKEN"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Tabber.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed-path error.
    pub fn malformed_path(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedPath, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a wrong-type error.
    pub fn wrong_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WrongType, message)
    }

    /// Create an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// Create a not-empty error.
    pub fn not_empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotEmpty, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create an email-taken error.
    pub fn email_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmailTaken, message)
    }

    /// Create the single invalid-credentials error.
    ///
    /// The message is fixed so unknown emails and wrong passwords are
    /// indistinguishable.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid credentials")
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns true if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
