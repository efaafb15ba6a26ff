//! File-backed session implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use pawsearch_core::Session as SessionTrait;
use pawsearch_core::{
    AuthToken, DogId, DogRecord, Result, SearchRequest, SearchResults, ServiceUrl,
};

use crate::service::FileService;
use crate::store::PageQuery;

/// Session for a file-backed service.
#[derive(Debug, Clone)]
pub struct FileSession {
    service: FileService,
    user: String,
    token: AuthToken,
}

impl FileSession {
    pub(crate) fn new(service: FileService, user: String, token: AuthToken) -> Self {
        Self {
            service,
            user,
            token,
        }
    }

    fn ensure_valid(&self) -> Result<()> {
        FileService::parse_token(&self.token).map(|_| ())
    }
}

#[async_trait]
impl SessionTrait for FileSession {
    fn service(&self) -> &ServiceUrl {
        self.service.url()
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn token(&self) -> AuthToken {
        self.token.clone()
    }

    #[instrument(skip(self), fields(user = %self.user))]
    async fn list_breeds(&self) -> Result<Vec<String>> {
        debug!("Listing breeds");
        self.ensure_valid()?;
        self.service.store().breeds()
    }

    #[instrument(skip(self), fields(user = %self.user))]
    async fn search_dogs(&self, request: &SearchRequest) -> Result<SearchResults> {
        debug!("Searching");
        self.ensure_valid()?;
        let query = PageQuery::from_request(request)?;
        self.service.store().search(&query)
    }

    #[instrument(skip(self, ids), fields(user = %self.user, count = ids.len()))]
    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>> {
        debug!("Fetching dogs");
        self.ensure_valid()?;
        self.service.store().lookup(ids)
    }

    #[instrument(skip(self, ids), fields(user = %self.user, count = ids.len()))]
    async fn match_dogs(&self, ids: &[DogId]) -> Result<DogId> {
        debug!("Requesting match");
        self.ensure_valid()?;
        self.service.store().pick_match(ids)
    }

    async fn logout(&self) -> Result<()> {
        debug!(user = %self.user, "Logged out");
        Ok(())
    }
}
