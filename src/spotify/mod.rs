//! # Spotify Integration Module
//!
//! Thin layer between the recommendation engine and the Spotify Web API.
//!
//! ```text
//! Recommendation engine (recommend)
//!          ↓
//! Endpoint wrappers (library, tracks)
//!          ↓
//! fetch_json: credential check, status classification, JSON decoding
//!          ↓
//! RemoteApi::get (SpotifyClient over reqwest, or a scripted fake in tests)
//! ```
//!
//! Every remote call goes through [`fetch_json`], which returns a tagged result:
//! the decoded payload or a classified [`RecError`]. Status 429 becomes
//! [`RecError::RateLimited`], any other non-2xx status becomes
//! [`RecError::RemoteApi`], and an undecodable body becomes [`RecError::Decode`].
//! There is no automatic retry. A 429 is surfaced to the caller as-is.
//!
//! The OAuth authorization-code handshake used by the web host lives in [`auth`].

pub mod auth;
pub mod library;
pub mod tracks;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;

use crate::{error::RecError, management::CredentialContext};

/// Status, optional `Retry-After` seconds and raw body of one Web API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub retry_after: Option<u64>,
    pub body: String,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            retry_after: None,
            body: body.into(),
        }
    }
}

/// The single I/O primitive the engine depends on: an authenticated GET of a path
/// relative to the Web API base URL.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn get(&self, path: &str, bearer: &str) -> Result<RawResponse, RecError>;
}

/// Web API client backed by reqwest.
///
/// Paths handed to [`RemoteApi::get`] are joined onto the base URL, usually
/// `https://api.spotify.com/v1`. Every request carries the bearer token and is
/// bounded by the timeout given to [`SpotifyClient::new`].
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    /// Creates a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Joins `path` onto the base URL, tolerating a leading or trailing slash.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RemoteApi for SpotifyClient {
    async fn get(&self, path: &str, bearer: &str) -> Result<RawResponse, RecError> {
        let response = self
            .http
            .get(self.url_for(path))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| RecError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let body = response
            .text()
            .await
            .map_err(|e| RecError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Performs one authenticated GET and decodes the JSON body into `T`.
///
/// The credential is checked before the request is issued, so an absent or expired
/// token never reaches the network.
///
/// # Arguments
///
/// * `api` - Transport that issues the GET
/// * `credential` - Source of the bearer token
/// * `path` - Path and query relative to the Web API base, e.g. `me/albums?limit=5`
///
/// # Errors
///
/// - [`RecError::NotAuthenticated`] / [`RecError::CredentialExpired`] - The credential
///   cannot be used
/// - [`RecError::Transport`] - The request never produced a response (connection,
///   timeout)
/// - [`RecError::RateLimited`] - Status 429, with the `Retry-After` seconds if sent
/// - [`RecError::RemoteApi`] - Any other non-2xx status, with the response body
/// - [`RecError::Decode`] - A 2xx body that is not the expected JSON
///
/// # Rate Limiting
///
/// A 429 is never retried here. The traversal stops and the host tells the user to
/// come back later.
pub async fn fetch_json<T, A>(
    api: &A,
    credential: &CredentialContext,
    path: &str,
) -> Result<T, RecError>
where
    T: DeserializeOwned,
    A: RemoteApi + ?Sized,
{
    let bearer = credential.bearer()?;
    let response = api.get(path, bearer).await?;
    classify(response)
}

fn classify<T: DeserializeOwned>(response: RawResponse) -> Result<T, RecError> {
    if response.status == StatusCode::TOO_MANY_REQUESTS.as_u16() {
        return Err(RecError::RateLimited {
            retry_after: response.retry_after,
        });
    }

    if !(200..300).contains(&response.status) {
        return Err(RecError::RemoteApi {
            status: response.status,
            body: response.body,
        });
    }

    serde_json::from_str(&response.body).map_err(|e| RecError::Decode(e.to_string()))
}
