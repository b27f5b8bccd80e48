use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config::Config,
    types::{Token, TokenResponse},
};

/// Builds the Spotify authorization URL for the authorization-code flow with PKCE.
///
/// The user is redirected here from `/auth/login`. Spotify sends them back to the
/// configured redirect URI with `code` and the echoed `state`, or with `error` when
/// the login was cancelled.
pub fn authorize_url(config: &Config, code_challenge: &str, state: &str) -> Result<String, String> {
    let show_dialog = if config.show_dialog { "true" } else { "false" };
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
            ("show_dialog", show_dialog),
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access token.
///
/// The PKCE verifier proves this server started the flow. The client secret is
/// sent as well when one is configured.
pub async fn exchange_code(
    http: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, reqwest::Error> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("client_id", config.client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];
    if let Some(secret) = &config.client_secret {
        form.push(("client_secret", secret.as_str()));
    }

    let res = http
        .post(&config.token_url)
        .form(&form)
        .send()
        .await?
        .error_for_status()?;

    let json = res.json::<TokenResponse>().await?;
    Ok(into_token(json, None))
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; when the response omits one the
/// previous refresh token is kept.
pub async fn refresh_token(
    http: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token, reqwest::Error> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", config.client_id.as_str()),
    ];
    if let Some(secret) = &config.client_secret {
        form.push(("client_secret", secret.as_str()));
    }

    let res = http
        .post(&config.token_url)
        .form(&form)
        .send()
        .await?
        .error_for_status()?;

    let json = res.json::<TokenResponse>().await?;
    Ok(into_token(json, Some(refresh_token)))
}

pub fn into_token(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string)),
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp().max(0) as u64,
    }
}
