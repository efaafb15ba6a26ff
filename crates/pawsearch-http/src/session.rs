//! HTTP-backed session implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use pawsearch_core::{
    AuthToken, DogId, DogRecord, Result, SearchRequest, SearchResults, ServiceUrl, Session,
};

use crate::http::endpoints::{BREEDS, DOGS, LOGOUT, MATCH, MatchResponse, SEARCH, SearchQuery};
use crate::service::HttpService;

/// Session for a network adoption service.
///
/// Cheap to clone; clones share the same token.
#[derive(Clone)]
pub struct HttpSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    service: HttpService,
    user: String,
    token: AuthToken,
}

impl HttpSession {
    pub(crate) fn new(service: HttpService, user: String, token: AuthToken) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                service,
                user,
                token,
            }),
        }
    }
}

#[async_trait]
impl Session for HttpSession {
    fn service(&self) -> &ServiceUrl {
        self.inner.service.url()
    }

    fn user(&self) -> &str {
        &self.inner.user
    }

    fn token(&self) -> AuthToken {
        self.inner.token.clone()
    }

    #[instrument(skip(self), fields(user = %self.inner.user))]
    async fn list_breeds(&self) -> Result<Vec<String>> {
        debug!("Listing breeds");
        self.inner
            .service
            .client()
            .get(BREEDS, None::<&()>, &self.inner.token)
            .await
    }

    #[instrument(skip(self), fields(user = %self.inner.user))]
    async fn search_dogs(&self, request: &SearchRequest) -> Result<SearchResults> {
        let client = self.inner.service.client();
        match request {
            SearchRequest::FirstPage { breed, sort, size } => {
                debug!("Searching first page");
                let query = SearchQuery {
                    breeds: breed.as_deref(),
                    size: *size,
                    sort: sort.as_param(),
                };
                client.get(SEARCH, Some(&query), &self.inner.token).await
            }
            SearchRequest::Cursor(cursor) => {
                debug!(%cursor, "Searching from cursor");
                let url = client.service().cursor_url(cursor);
                client.get_url(&url, None::<&()>, &self.inner.token).await
            }
        }
    }

    #[instrument(skip(self, ids), fields(user = %self.inner.user, count = ids.len()))]
    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>> {
        debug!("Fetching dogs");
        self.inner
            .service
            .client()
            .post(DOGS, &ids, &self.inner.token)
            .await
    }

    #[instrument(skip(self, ids), fields(user = %self.inner.user, count = ids.len()))]
    async fn match_dogs(&self, ids: &[DogId]) -> Result<DogId> {
        debug!("Requesting match");
        let response: MatchResponse = self
            .inner
            .service
            .client()
            .post(MATCH, &ids, &self.inner.token)
            .await?;
        Ok(response.matched)
    }

    #[instrument(skip(self), fields(user = %self.inner.user))]
    async fn logout(&self) -> Result<()> {
        self.inner
            .service
            .client()
            .post_no_response(LOGOUT, &self.inner.token)
            .await?;
        info!("Logged out");
        Ok(())
    }
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("service", self.inner.service.url())
            .field("user", &self.inner.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
