//! User-facing notices.

use std::fmt;

use crate::error::{AuthError, Error, ErrorClass, PreconditionError};
use crate::types::DogId;

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The service rejected the login.
    LoginFailed,
    /// The session is missing or expired.
    Reauthenticate,
    /// A remote call failed; repeating the action may succeed.
    Retry(String),
    /// Match requested with nothing selected.
    NoFavorites,
    /// Next requested on the last page.
    NoNextPage,
    /// Prev requested on the first page.
    NoPrevPage,
    /// Local input was rejected.
    Invalid(String),
    /// The service picked a match.
    Matched(DogId),
}

impl Notice {
    /// Translate an error into the notice shown for it.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Auth(AuthError::InvalidCredentials(_)) => Notice::LoginFailed,
            Error::Precondition(PreconditionError::NoFavorites) => Notice::NoFavorites,
            Error::Precondition(PreconditionError::NoNextPage) => Notice::NoNextPage,
            Error::Precondition(PreconditionError::NoPrevPage) => Notice::NoPrevPage,
            Error::InvalidInput(e) => Notice::Invalid(e.to_string()),
            other => match other.class() {
                ErrorClass::Authentication => Notice::Reauthenticate,
                _ => Notice::Retry(other.to_string()),
            },
        }
    }

    /// Returns true if the notice reports a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::Matched(_))
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        Notice::from_error(err)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoginFailed => f.write_str("Login failed. Please check your credentials."),
            Notice::Reauthenticate => {
                f.write_str("Your session has expired. Please log in again.")
            }
            Notice::Retry(reason) => write!(f, "Request failed ({reason}). Please try again."),
            Notice::NoFavorites => f.write_str("No favorites selected!"),
            Notice::NoNextPage => f.write_str("You are on the last page."),
            Notice::NoPrevPage => f.write_str("You are on the first page."),
            Notice::Invalid(reason) => f.write_str(reason),
            Notice::Matched(id) => write!(f, "Your match is dog ID: {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProtocolError, TransportError};

    #[test]
    fn expired_session_asks_for_login() {
        let err = Error::Protocol(ProtocolError::new(401, None));
        assert_eq!(Notice::from_error(&err), Notice::Reauthenticate);
    }

    #[test]
    fn transport_failure_is_retryable_notice() {
        let notice = Notice::from(&Error::from(TransportError::Timeout));
        assert!(matches!(notice, Notice::Retry(_)));
        assert!(notice.to_string().contains("try again"));
    }

    #[test]
    fn match_notice_names_the_dog() {
        let notice = Notice::Matched(DogId::new("a1").unwrap());
        assert_eq!(notice.to_string(), "Your match is dog ID: a1");
        assert!(!notice.is_failure());
    }
}
