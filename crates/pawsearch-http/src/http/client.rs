//! HTTP client for the adoption service.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use pawsearch_core::error::{Error, InvalidInputError, ProtocolError, TransportError};
use pawsearch_core::{AuthToken, ServiceUrl};

use super::endpoints::AUTH_COOKIE;
use crate::HttpConfig;

/// Longest error body kept in a [`ProtocolError`] message.
const MAX_ERROR_BODY: usize = 200;

/// HTTP client bound to one service URL.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    service: ServiceUrl,
}

/// Map a reqwest failure onto the pawsearch error taxonomy.
pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Transport(TransportError::Timeout)
    } else if err.is_connect() {
        Error::Transport(TransportError::Connection {
            message: err.to_string(),
        })
    } else if err.is_decode() {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(200);
        Error::Protocol(ProtocolError::new(
            status,
            Some(format!("undecodable response: {err}")),
        ))
    } else {
        Error::Transport(TransportError::Http {
            message: err.to_string(),
        })
    }
}

impl ServiceClient {
    /// Create a new client for the given service.
    pub fn new(service: ServiceUrl, config: &HttpConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client, service })
    }

    /// Returns the service URL this client is configured for.
    pub fn service(&self) -> &ServiceUrl {
        &self.service
    }

    /// Log in and return the session token from the auth cookie.
    #[instrument(skip(self, body), fields(service = %self.service))]
    pub async fn login<B>(&self, path: &str, body: &B) -> Result<AuthToken, Error>
    where
        B: Serialize,
    {
        let url = self.service.endpoint(path);
        debug!(%url, "Login request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Protocol(parse_error_response(response).await));
        }

        extract_auth_cookie(response.headers()).ok_or_else(|| {
            Error::Protocol(ProtocolError::new(
                status.as_u16(),
                Some(format!("login response did not set {AUTH_COOKIE}")),
            ))
        })
    }

    /// Make an authenticated GET request to an endpoint path.
    #[instrument(skip(self, token), fields(service = %self.service))]
    pub async fn get<Q, R>(&self, path: &str, params: Option<&Q>, token: &AuthToken) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.service.endpoint(path);
        self.get_url(&url, params, token).await
    }

    /// Make an authenticated GET request to an absolute URL.
    #[instrument(skip(self, token), fields(service = %self.service))]
    pub async fn get_url<Q, R>(
        &self,
        url: &str,
        params: Option<&Q>,
        token: &AuthToken,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(%url, "GET");
        trace!(?params, "query parameters");

        let mut request = self.client.get(url).headers(auth_headers(token)?);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(map_reqwest)?;
        handle_response(response).await
    }

    /// Make an authenticated POST request with a JSON body.
    #[instrument(skip(self, body, token), fields(service = %self.service))]
    pub async fn post<B, R>(&self, path: &str, body: &B, token: &AuthToken) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.service.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .headers(auth_headers(token)?)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;

        handle_response(response).await
    }

    /// Make an authenticated POST request whose response body is ignored.
    #[instrument(skip(self, token), fields(service = %self.service))]
    pub async fn post_no_response(&self, path: &str, token: &AuthToken) -> Result<(), Error> {
        let url = self.service.endpoint(path);
        debug!(%url, "POST (no response)");

        let response = self
            .client
            .post(&url)
            .headers(auth_headers(token)?)
            .send()
            .await
            .map_err(map_reqwest)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }
}

/// Build the cookie header that authenticates a request.
fn auth_headers(token: &AuthToken) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("{}={}", AUTH_COOKIE, token.as_str())).map_err(
        |_| InvalidInputError::Other {
            message: "session token contains characters not allowed in a header".to_string(),
        },
    )?;
    headers.insert(COOKIE, value);
    Ok(headers)
}

/// Find the auth cookie among `Set-Cookie` headers.
fn extract_auth_cookie(headers: &HeaderMap) -> Option<AuthToken> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| {
            let pair = cookie.split(';').next()?.trim();
            let (name, value) = pair.split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| AuthToken::new(value))
        })
        .next()
}

async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, Error> {
    let status = response.status();
    trace!(status = %status, "response");

    if status.is_success() {
        response.json::<R>().await.map_err(map_reqwest)
    } else {
        Err(Error::Protocol(parse_error_response(response).await))
    }
}

/// Turn a non-success response into a protocol error. The service answers
/// errors with short plain-text bodies.
async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .map(|body| body.trim().chars().take(MAX_ERROR_BODY).collect::<String>())
        .filter(|body| !body.is_empty());
    ProtocolError::new(status, message)
}
