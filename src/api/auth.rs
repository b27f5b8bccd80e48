use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    api::{AppState, pages, session_cookie, session_id},
    info,
    spotify::auth,
    types::PkceToken,
    utils, warning,
};

/// Starts the authorization-code flow: stores a PKCE verifier and a `state` value in
/// the browser's session and redirects to Spotify.
pub async fn login(Extension(state): Extension<AppState>, jar: CookieJar) -> Response {
    let id = state.sessions.ensure(session_id(&jar).as_deref()).await;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let csrf_state = utils::generate_state();

    let auth_url = match auth::authorize_url(&state.config, &code_challenge, &csrf_state) {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::login_failed_page("the server is misconfigured")),
            )
                .into_response();
        }
    };

    state
        .sessions
        .set_pkce(
            &id,
            PkceToken {
                code_verifier,
                state: csrf_state,
            },
        )
        .await;

    (jar.add(session_cookie(id)), Redirect::to(&auth_url)).into_response()
}

/// Spotify redirects here after the user approved (or cancelled) the login.
///
/// # Behavior
///
/// - `error` present (login cancelled): the pending handshake is dropped and the
///   browser goes back to `/`
/// - no session, no pending handshake, no `code`, or a `state` that does not match
///   the one issued by [`login`]: 400 with the login-failed page
/// - otherwise the code is exchanged for a token, the token is stored in the session
///   and the loading page forwards to `/recs`
///
/// The pending handshake is consumed on every path, so a callback URL cannot be
/// replayed.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
    jar: CookieJar,
) -> Response {
    // "error" is only sent when the user pressed cancel
    if params.contains_key("error") {
        if let Some(id) = session_id(&jar) {
            state.sessions.take_pkce(&id).await;
        }
        return Redirect::to("/").into_response();
    }

    let Some(id) = session_id(&jar) else {
        return login_failed("missing session");
    };
    let Some(pkce) = state.sessions.take_pkce(&id).await else {
        return login_failed("missing PKCE code verifier");
    };
    let Some(code) = params.get("code") else {
        return login_failed("missing authorization code");
    };
    if params.get("state") != Some(&pkce.state) {
        return login_failed("state mismatch");
    }

    match auth::exchange_code(&state.http, &state.config, code, &pkce.code_verifier).await {
        Ok(token) => {
            state.sessions.set_token(&id, token).await;
            info!("Session {} logged in.", id);
            Html(pages::loading_page()).into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            login_failed("token exchange failed")
        }
    }
}

/// Swaps the session's refresh token for a new access token, then returns to `/recs`.
///
/// Falls back to `/auth/login` when there is no session, no refresh token, or the
/// accounts service rejects the refresh.
pub async fn refresh_token(Extension(state): Extension<AppState>, jar: CookieJar) -> Response {
    let Some(id) = session_id(&jar) else {
        return Redirect::to("/auth/login").into_response();
    };
    let Some(refresh) = state
        .sessions
        .token(&id)
        .await
        .and_then(|t| t.refresh_token)
    else {
        return Redirect::to("/auth/login").into_response();
    };

    match auth::refresh_token(&state.http, &state.config, &refresh).await {
        Ok(token) => {
            state.sessions.set_token(&id, token).await;
            Redirect::to("/recs").into_response()
        }
        Err(e) => {
            warning!("Token refresh failed: {}", e);
            Redirect::to("/auth/login").into_response()
        }
    }
}

/// Forgets the browser's session, token included, and returns to the welcome page.
pub async fn logout(Extension(state): Extension<AppState>, jar: CookieJar) -> Response {
    if let Some(id) = session_id(&jar) {
        state.sessions.remove(&id).await;
    }
    Redirect::to("/").into_response()
}

fn login_failed(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, Html(pages::login_failed_page(reason))).into_response()
}
