//! Service trait.

use async_trait::async_trait;

use crate::types::ServiceUrl;
use crate::{Credentials, Result};

use super::Session;

/// An adoption service implementation.
#[async_trait]
pub trait Service: Send + Sync {
    /// Session type for this service.
    type Session: Session;

    /// Returns the base URL for this instance.
    fn url(&self) -> &ServiceUrl;

    /// Authenticate with the service and create a new session.
    async fn login(&self, credentials: Credentials) -> Result<Self::Session>;
}
