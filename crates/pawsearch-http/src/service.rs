//! HTTP-backed service implementation.

use async_trait::async_trait;
use tracing::{info, instrument};

use pawsearch_core::error::{AuthError, Error};
use pawsearch_core::{AuthToken, Credentials, Result, Service, ServiceUrl};

use crate::config::HttpConfig;
use crate::http::ServiceClient;
use crate::http::endpoints::{LOGIN, LoginRequest};
use crate::session::HttpSession;

/// A network-backed adoption service.
#[derive(Debug, Clone)]
pub struct HttpService {
    url: ServiceUrl,
    client: ServiceClient,
}

impl HttpService {
    /// Create a new HTTP service with default settings.
    pub fn new(url: ServiceUrl) -> Result<Self> {
        Self::with_config(url, &HttpConfig::default())
    }

    /// Create a new HTTP service with explicit settings.
    pub fn with_config(url: ServiceUrl, config: &HttpConfig) -> Result<Self> {
        let client = ServiceClient::new(url.clone(), config)?;
        Ok(Self { url, client })
    }

    /// Returns the service URL for this instance.
    pub fn url(&self) -> &ServiceUrl {
        &self.url
    }

    pub(crate) fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Open a session from a token obtained earlier.
    ///
    /// The token is not checked until the first call; an expired one
    /// surfaces as an authentication error there.
    pub fn resume(&self, user: impl Into<String>, token: AuthToken) -> HttpSession {
        HttpSession::new(self.clone(), user.into(), token)
    }
}

#[async_trait]
impl Service for HttpService {
    type Session = HttpSession;

    fn url(&self) -> &ServiceUrl {
        &self.url
    }

    #[instrument(skip(self, credentials), fields(service = %self.url, name = %credentials.name()))]
    async fn login(&self, credentials: Credentials) -> Result<Self::Session> {
        let request = LoginRequest {
            name: credentials.name(),
            email: credentials.email(),
        };

        let token = self.client.login(LOGIN, &request).await.map_err(|e| match e {
            Error::Protocol(p) if (400..500).contains(&p.status) => {
                Error::Auth(AuthError::InvalidCredentials(p.to_string()))
            }
            other => other,
        })?;

        info!("Session created");
        Ok(self.resume(credentials.name(), token))
    }
}
