//! Dog identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Identifier of a dog in the catalog.
///
/// Identifiers are issued by the service and treated as opaque; the only
/// local requirement is that they are non-empty and free of whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DogId(String);

impl DogId {
    /// Create a new dog id, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::DogId {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidInputError::DogId {
                value: s.to_string(),
                reason: "must not contain whitespace".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DogId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DogId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DogId> for String {
    fn from(id: DogId) -> Self {
        id.0
    }
}

impl AsRef<str> for DogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
