//! Error taxonomy for the recommendation engine and the outcomes the host renders.

use serde::Serialize;
use thiserror::Error;

/// Everything that can stop or degrade a recommendation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("access token expired")]
    CredentialExpired,
    #[error("rate limited by the Spotify API")]
    RateLimited { retry_after: Option<u64> },
    #[error("Spotify API returned status {status}: {body}")]
    RemoteApi { status: u16, body: String },
    #[error("request to the Spotify API failed: {0}")]
    Transport(String),
    #[error("malformed Spotify API response: {0}")]
    Decode(String),
    /// The listener has no saved albums. Carried on the error channel because it is
    /// terminal, but it is rendered as an empty state rather than an error page.
    #[error("no saved albums in library")]
    EmptyLibrary,
    #[error("no audio features available for album {album_id}")]
    NoFeaturesAvailable { album_id: String },
}

impl RecError {
    /// Maps an error onto the page or message the host shows for it.
    ///
    /// `NoFeaturesAvailable` normally never leaves the engine, since the seed is
    /// skipped; should it surface, it is treated as a generic remote error.
    pub fn outcome(&self) -> Outcome {
        match self {
            RecError::NotAuthenticated => Outcome::NeedsLogin,
            RecError::CredentialExpired => Outcome::NeedsRefresh,
            RecError::RateLimited { retry_after } => Outcome::RateLimited {
                retry_after: *retry_after,
            },
            RecError::EmptyLibrary => Outcome::EmptyLibrary,
            RecError::RemoteApi { .. }
            | RecError::Transport(_)
            | RecError::Decode(_)
            | RecError::NoFeaturesAvailable { .. } => Outcome::GenericRemoteError,
        }
    }
}

/// Terminal outcomes shown in place of recommendations. Each maps to its own page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    NeedsLogin,
    NeedsRefresh,
    EmptyLibrary,
    RateLimited { retry_after: Option<u64> },
    GenericRemoteError,
}

/// Errors raised while reading the configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
