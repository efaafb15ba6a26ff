//! CLI session wrapper and persistence.

pub mod storage;

use async_trait::async_trait;

use pawsearch_core::{
    AuthToken, Credentials, DogId, DogRecord, Result, SearchRequest, SearchResults, Service,
    ServiceUrl, Session,
};
use pawsearch_file::{FileService, FileSession};
use pawsearch_http::{HttpConfig, HttpService, HttpSession};

/// A session on whichever backend the service URL selects.
#[derive(Debug)]
pub enum CliSession {
    File(FileSession),
    Http(HttpSession),
}

impl CliSession {
    /// Log in to `service`: `file://` URLs use the local catalog.
    pub async fn login(
        service: ServiceUrl,
        credentials: Credentials,
        config: &HttpConfig,
    ) -> Result<Self> {
        if service.is_local() {
            let backend = FileService::from_url(service)?;
            Ok(CliSession::File(backend.login(credentials).await?))
        } else {
            let backend = HttpService::with_config(service, config)?;
            Ok(CliSession::Http(backend.login(credentials).await?))
        }
    }

    /// Reopen a session from a stored token.
    pub fn resume(
        service: ServiceUrl,
        user: &str,
        token: AuthToken,
        config: &HttpConfig,
    ) -> Result<Self> {
        if service.is_local() {
            let backend = FileService::from_url(service)?;
            Ok(CliSession::File(backend.resume(token)?))
        } else {
            let backend = HttpService::with_config(service, config)?;
            Ok(CliSession::Http(backend.resume(user, token)))
        }
    }
}

#[async_trait]
impl Session for CliSession {
    fn service(&self) -> &ServiceUrl {
        match self {
            CliSession::File(session) => session.service(),
            CliSession::Http(session) => session.service(),
        }
    }

    fn user(&self) -> &str {
        match self {
            CliSession::File(session) => session.user(),
            CliSession::Http(session) => session.user(),
        }
    }

    fn token(&self) -> AuthToken {
        match self {
            CliSession::File(session) => session.token(),
            CliSession::Http(session) => session.token(),
        }
    }

    async fn list_breeds(&self) -> Result<Vec<String>> {
        match self {
            CliSession::File(session) => session.list_breeds().await,
            CliSession::Http(session) => session.list_breeds().await,
        }
    }

    async fn search_dogs(&self, request: &SearchRequest) -> Result<SearchResults> {
        match self {
            CliSession::File(session) => session.search_dogs(request).await,
            CliSession::Http(session) => session.search_dogs(request).await,
        }
    }

    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>> {
        match self {
            CliSession::File(session) => session.fetch_dogs(ids).await,
            CliSession::Http(session) => session.fetch_dogs(ids).await,
        }
    }

    async fn match_dogs(&self, ids: &[DogId]) -> Result<DogId> {
        match self {
            CliSession::File(session) => session.match_dogs(ids).await,
            CliSession::Http(session) => session.match_dogs(ids).await,
        }
    }

    async fn logout(&self) -> Result<()> {
        match self {
            CliSession::File(session) => session.logout().await,
            CliSession::Http(session) => session.logout().await,
        }
    }
}
