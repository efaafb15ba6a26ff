//! Login credentials type.

use std::fmt;

/// Login credentials for the adoption service.
///
/// The service identifies a visitor by name and email address; there is no
/// password. The email is kept out of Debug output so it never lands in logs.
///
/// # Example
///
/// ```
/// use pawsearch_core::Credentials;
///
/// let creds = Credentials::new("Ada", "ada@example.com");
/// assert_eq!(creds.name(), "Ada");
/// ```
#[derive(Clone)]
pub struct Credentials {
    name: String,
    email: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the visitor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the visitor's email address.
    ///
    /// Use this only when constructing the login request.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &"[REDACTED]")
            .finish()
    }
}
