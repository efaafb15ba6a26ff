//! Error types for pawsearch.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, input validation and local
//! precondition failures, plus [`ErrorClass`], the coarse grouping a
//! front end uses to decide how to present a failure.

use std::fmt;
use thiserror::Error;

/// The unified error type for pawsearch operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing or expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-success status, undecodable body).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (invalid id, invalid service URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// An operation was invoked while its precondition did not hold.
    #[error("{0}")]
    Precondition(#[from] PreconditionError),
}

/// How a failure should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The session is missing or no longer valid; the user must log in again.
    Authentication,
    /// Connectivity or service failure; the user may retry the action.
    Transient,
    /// Handled locally without touching the network.
    Precondition,
    /// Malformed local input.
    InvalidInput,
}

impl Error {
    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Auth(_) => ErrorClass::Authentication,
            Error::Protocol(e) if e.is_auth_error() => ErrorClass::Authentication,
            Error::Transport(_) | Error::Protocol(_) => ErrorClass::Transient,
            Error::Precondition(_) => ErrorClass::Precondition,
            Error::InvalidInput(_) => ErrorClass::InvalidInput,
        }
    }

    /// Returns true if re-issuing the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transient
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Local I/O failed (file-backed service).
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service rejected the login.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// No session has been established.
    #[error("not logged in")]
    MissingSession,

    /// The session token was rejected or has expired.
    #[error("session expired")]
    SessionExpired,
}

/// Protocol-level errors from service responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the service, if any.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid dog identifier.
    #[error("invalid dog id '{value}': {reason}")]
    DogId { value: String, reason: String },

    /// Invalid service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Invalid sort order.
    #[error("invalid sort order '{value}': expected 'asc' or 'desc'")]
    SortOrder { value: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Locally detected precondition violations. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// A match was requested with an empty selection.
    #[error("no favorites selected")]
    NoFavorites,

    /// Next was requested while the service reported no next page.
    #[error("there is no next page")]
    NoNextPage,

    /// Prev was requested while the service reported no previous page.
    #[error("there is no previous page")]
    NoPrevPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_is_authentication_class() {
        let err = Error::Protocol(ProtocolError::new(401, None));
        assert_eq!(err.class(), ErrorClass::Authentication);
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_error_is_transient() {
        let err = Error::Protocol(ProtocolError::new(503, Some("busy".into())));
        assert_eq!(err.class(), ErrorClass::Transient);
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "protocol error: HTTP 503: busy");
    }

    #[test]
    fn precondition_is_local() {
        let err = Error::from(PreconditionError::NoFavorites);
        assert_eq!(err.class(), ErrorClass::Precondition);
        assert_eq!(err.to_string(), "no favorites selected");
    }

    #[test]
    fn timeout_is_transient() {
        assert!(Error::from(TransportError::Timeout).is_retryable());
    }
}
