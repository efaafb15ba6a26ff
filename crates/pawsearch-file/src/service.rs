//! File-backed service implementation.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, instrument};

use pawsearch_core::error::{AuthError, Error, InvalidInputError};
use pawsearch_core::{AuthToken, Credentials, Result, Service, ServiceUrl};

use crate::session::FileSession;
use crate::store::FileStore;

/// Filesystem-backed adoption service.
///
/// Any well-formed name and email is accepted at login.
#[derive(Debug, Clone)]
pub struct FileService {
    store: FileStore,
    url: ServiceUrl,
}

impl FileService {
    /// Create a new file-backed service at the given root directory.
    pub fn new(root: impl AsRef<std::path::Path>, url: ServiceUrl) -> Self {
        Self {
            store: FileStore::new(root),
            url,
        }
    }

    /// Open the service rooted at a `file://` URL.
    pub fn from_url(url: ServiceUrl) -> Result<Self> {
        let root = url
            .to_file_path()
            .ok_or_else(|| InvalidInputError::ServiceUrl {
                value: url.to_string(),
                reason: "not a file:// URL".to_string(),
            })?;
        Ok(Self::new(root, url))
    }

    /// Returns the service URL for this instance.
    pub fn url(&self) -> &ServiceUrl {
        &self.url
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Reopen a session from a token issued by [`Service::login`].
    pub fn resume(&self, token: AuthToken) -> Result<FileSession> {
        let (name, _) = Self::parse_token(&token)?;
        Ok(FileSession::new(self.clone(), name, token))
    }

    fn make_token(name: &str, email: &str) -> AuthToken {
        let token = json!({
            "name": name,
            "email": email,
        })
        .to_string();
        AuthToken::new(token)
    }

    pub(crate) fn parse_token(token: &AuthToken) -> Result<(String, String)> {
        let value: serde_json::Value =
            serde_json::from_str(token.as_str()).map_err(|_| AuthError::SessionExpired)?;

        let field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(Error::Auth(AuthError::SessionExpired))
        };

        Ok((field("name")?, field("email")?))
    }
}

#[async_trait]
impl Service for FileService {
    type Session = FileSession;

    fn url(&self) -> &ServiceUrl {
        self.url()
    }

    #[instrument(skip(self, credentials), fields(service = %self.url, name = %credentials.name()))]
    async fn login(&self, credentials: Credentials) -> Result<Self::Session> {
        let name = credentials.name().trim();
        let email = credentials.email().trim();

        if name.is_empty() {
            return Err(AuthError::InvalidCredentials("name is required".to_string()).into());
        }
        if !email.contains('@') {
            return Err(AuthError::InvalidCredentials("email is invalid".to_string()).into());
        }

        let token = Self::make_token(name, email);
        info!("Session created");
        Ok(FileSession::new(self.clone(), name.to_string(), token))
    }
}
