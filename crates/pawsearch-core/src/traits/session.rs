//! Authenticated session trait.

use async_trait::async_trait;

use crate::types::{DogId, DogRecord, SearchRequest, SearchResults, ServiceUrl};
use crate::{AuthToken, Result};

/// An authenticated session against the adoption service.
///
/// Every remote catalog operation goes through a session; holding one is the
/// capability to call the service.
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns the service URL associated with this session.
    fn service(&self) -> &ServiceUrl;

    /// Returns the name the session was opened with.
    fn user(&self) -> &str;

    /// Returns the token presented on every call.
    fn token(&self) -> AuthToken;

    /// List every breed name known to the service.
    async fn list_breeds(&self) -> Result<Vec<String>>;

    /// Run a search and return one page of ids plus neighbour cursors.
    async fn search_dogs(&self, request: &SearchRequest) -> Result<SearchResults>;

    /// Resolve ids to full records. The output order is unspecified.
    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>>;

    /// Ask the service to pick one match among the given ids.
    async fn match_dogs(&self, ids: &[DogId]) -> Result<DogId>;

    /// End the session on the service side.
    async fn logout(&self) -> Result<()>;
}
