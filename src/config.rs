//! Configuration management for RecordRecs.
//!
//! Configuration values come from environment variables, optionally seeded from
//! `.env` files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/recordrecs/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-library-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// The working-directory `.env` is read first, then the one in the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/recordrecs/.env`
/// - macOS: `~/Library/Application Support/recordrecs/.env`
/// - Windows: `%LOCALAPPDATA%/recordrecs/.env`
///
/// Both files are optional. Variables already present in the environment are never
/// overwritten.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("recordrecs/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Runtime configuration for the web server and the Spotify client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_address: String,
    pub client_id: String,
    /// Sent on token exchange when present; PKCE alone is used otherwise.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub request_timeout: Duration,
    pub show_dialog: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `SPOTIFY_API_AUTH_CLIENT_ID` or
    /// `SPOTIFY_API_REDIRECT_URI` is unset, and [`ConfigError::Invalid`] when a
    /// numeric or boolean value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let request_timeout = parse_request_timeout(get("SPOTIFY_API_TIMEOUT_SECS"))?;

        let show_dialog = match get("SPOTIFY_API_SHOW_DIALOG") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "SPOTIFY_API_SHOW_DIALOG",
                value,
            })?,
            None => false,
        };

        Ok(Self {
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: get("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            request_timeout,
            show_dialog,
        })
    }
}

/// Web API base URL for the one-shot `recs` command, which needs no OAuth client.
pub fn api_url_from_env() -> String {
    env::var("SPOTIFY_API_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Per-call timeout for the one-shot `recs` command, read the same way as
/// [`Config::from_env`] reads it.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `SPOTIFY_API_TIMEOUT_SECS` is set but is not
/// a positive number of seconds.
pub fn request_timeout_from_env() -> Result<Duration, ConfigError> {
    parse_request_timeout(
        env::var("SPOTIFY_API_TIMEOUT_SECS")
            .ok()
            .filter(|value| !value.trim().is_empty()),
    )
}

/// Parses a `SPOTIFY_API_TIMEOUT_SECS` value.
///
/// `None` yields the default of [`DEFAULT_TIMEOUT_SECS`]. Zero, negative and
/// non-numeric values are rejected.
pub fn parse_request_timeout(value: Option<String>) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            key: "SPOTIFY_API_TIMEOUT_SECS",
            value,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
