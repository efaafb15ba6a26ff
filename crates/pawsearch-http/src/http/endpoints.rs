//! Service endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use pawsearch_core::DogId;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Log in with name and email; answers with the auth cookie.
pub const LOGIN: &str = "/auth/login";

/// End the session.
pub const LOGOUT: &str = "/auth/logout";

/// All breed names.
pub const BREEDS: &str = "/dogs/breeds";

/// Search for dog ids.
pub const SEARCH: &str = "/dogs/search";

/// Batch lookup of dogs by id.
pub const DOGS: &str = "/dogs";

/// Pick a match among ids.
pub const MATCH: &str = "/dogs/match";

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "fetch-access-token";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Query parameters for a first-page search.
#[derive(Debug, Serialize)]
pub struct SearchQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breeds: Option<&'a str>,
    pub size: u32,
    pub sort: String,
}

/// Response from the match endpoint.
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub matched: DogId,
}
