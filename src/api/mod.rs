//! # API Module
//!
//! HTTP handlers of the RecordRecs web app, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`index`] - Welcome page with the login link
//! - [`health`] - Status and version for monitoring
//! - [`login`] / [`callback`] - Spotify authorization-code flow with PKCE
//! - [`refresh_token`] - Renews an expired access token from the session
//! - [`recs`] / [`recs_json`] - Runs the recommendation engine for the session's
//!   credential and renders the result, or the page for the outcome that stopped it
//! - [`logout`] - Forgets the session
//!
//! Browser state lives in [`SessionManager`], keyed by the `recordrecs_session`
//! cookie.

mod auth;
mod health;
mod index;
pub mod pages;
mod recs;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use reqwest::Client;

use crate::{
    config::Config,
    management::{SESSION_COOKIE, SessionManager},
    spotify::SpotifyClient,
};

pub use auth::{callback, login, logout, refresh_token};
pub use health::health;
pub use index::index;
pub use recs::{outcome_status, recs, recs_json};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionManager,
    pub spotify: Arc<SpotifyClient>,
    /// Client for the accounts service (token exchange and refresh).
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let spotify = SpotifyClient::new(&config.api_url, config.request_timeout)?;
        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            config: Arc::new(config),
            sessions: SessionManager::new(),
            spotify: Arc::new(spotify),
            http,
        })
    }
}

pub(crate) fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub(crate) fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
