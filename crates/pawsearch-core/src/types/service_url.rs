//! Service URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

use super::Cursor;

/// A validated base URL for the adoption service.
///
/// Network URLs must use HTTPS (or HTTP for localhost). File URLs
/// (`file:///path/to/catalog`) select the filesystem-backed service used for
/// offline development and tests.
///
/// # Example
///
/// ```
/// use pawsearch_core::ServiceUrl;
///
/// let service = ServiceUrl::new("https://frontend-take-home-service.fetch.com").unwrap();
/// assert_eq!(service.endpoint("/dogs/breeds"),
///            "https://frontend-take-home-service.fetch.com/dogs/breeds");
///
/// let local = ServiceUrl::new("file:///tmp/catalog").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServiceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    fn base(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the absolute URL for an endpoint path such as `/dogs/search`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base(), path.trim_start_matches('/'))
    }

    /// Returns the absolute URL for a pagination cursor.
    ///
    /// The cursor is appended verbatim; the service issues cursors as
    /// path-and-query strings relative to its base URL.
    pub fn cursor_url(&self, cursor: &Cursor) -> String {
        let cursor = cursor.as_str();
        if cursor.starts_with('/') {
            format!("{}{}", self.base(), cursor)
        } else {
            format!("{}/{}", self.base(), cursor)
        }
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL scheme (e.g., "https", "http", "file").
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns true if this is a filesystem-backed service (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this is a network service (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        let scheme = self.0.scheme();
        scheme == "http" || scheme == "https"
    }

    /// Returns the filesystem path for file:// URLs.
    ///
    /// Returns `None` for non-file URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();

        if scheme == "file" {
            if url.path().is_empty() {
                return Err(InvalidInputError::ServiceUrl {
                    value: original.to_string(),
                    reason: "file:// URL must have a path".to_string(),
                }
                .into());
            }
            return Ok(());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let service = ServiceUrl::new("https://frontend-take-home-service.fetch.com").unwrap();
        assert_eq!(service.host(), Some("frontend-take-home-service.fetch.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let service = ServiceUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(service.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let service = ServiceUrl::new("https://dogs.example.com/").unwrap();
        assert_eq!(
            service.endpoint("/dogs/match"),
            "https://dogs.example.com/dogs/match"
        );
    }

    #[test]
    fn cursor_is_appended_verbatim() {
        let service = ServiceUrl::new("https://dogs.example.com").unwrap();
        let cursor = Cursor::new("/dogs/search?size=6&from=6&sort=breed:asc&breeds=Beagle");
        assert_eq!(
            service.cursor_url(&cursor),
            "https://dogs.example.com/dogs/search?size=6&from=6&sort=breed:asc&breeds=Beagle"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ServiceUrl::new("http://dogs.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ServiceUrl::new("/dogs/search").is_err());
    }

    #[test]
    fn valid_file_url() {
        let service = ServiceUrl::new("file:///tmp/catalog").unwrap();
        assert!(service.is_local());
        assert!(!service.is_network());
        assert_eq!(service.scheme(), "file");
    }

    #[cfg(unix)]
    #[test]
    fn file_url_to_path() {
        let service = ServiceUrl::new("file:///tmp/catalog").unwrap();
        let path = service.to_file_path().unwrap();
        assert_eq!(path, std::path::PathBuf::from("/tmp/catalog"));
    }

    #[test]
    fn network_url_not_local() {
        let service = ServiceUrl::new("https://dogs.example.com").unwrap();
        assert!(!service.is_local());
        assert!(service.to_file_path().is_none());
    }
}
