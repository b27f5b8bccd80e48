use axum::{
    Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;

use crate::{
    api::{AppState, pages, session_id},
    error::{Outcome, RecError},
    management::CredentialContext,
    recommend,
    types::ContentBlock,
    warning,
};

pub async fn recs(Extension(state): Extension<AppState>, jar: CookieJar) -> Response {
    match run(&state, &jar).await {
        Ok(content) => Html(pages::recs_page(&content)).into_response(),
        Err(e) => match e.outcome() {
            Outcome::NeedsLogin => Redirect::to("/auth/login").into_response(),
            Outcome::NeedsRefresh => Redirect::to("/refresh-token").into_response(),
            Outcome::EmptyLibrary => Html(pages::empty_library_page()).into_response(),
            outcome @ Outcome::RateLimited { retry_after } => (
                outcome_status(outcome),
                Html(pages::rate_limited_page(retry_after)),
            )
                .into_response(),
            outcome @ Outcome::GenericRemoteError => {
                (outcome_status(outcome), Html(pages::remote_error_page())).into_response()
            }
        },
    }
}

/// JSON flavour of `/recs` for scripted clients.
pub async fn recs_json(Extension(state): Extension<AppState>, jar: CookieJar) -> Response {
    match run(&state, &jar).await {
        Ok(content) => Json(json!({ "content": content })).into_response(),
        Err(e) => {
            let outcome = e.outcome();
            (outcome_status(outcome), Json(json!({ "error": outcome }))).into_response()
        }
    }
}

pub fn outcome_status(outcome: Outcome) -> StatusCode {
    match outcome {
        Outcome::NeedsLogin | Outcome::NeedsRefresh => StatusCode::UNAUTHORIZED,
        Outcome::EmptyLibrary => StatusCode::OK,
        Outcome::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        Outcome::GenericRemoteError => StatusCode::BAD_GATEWAY,
    }
}

async fn run(state: &AppState, jar: &CookieJar) -> Result<Vec<ContentBlock>, RecError> {
    let token = match session_id(jar) {
        Some(id) => state.sessions.token(&id).await,
        None => None,
    };
    let credential = CredentialContext::from_token(token.as_ref());
    let mut rng = StdRng::from_os_rng();

    let result = recommend::discover(state.spotify.as_ref(), &credential, &mut rng).await;
    if let Err(e) = &result {
        if matches!(
            e.outcome(),
            Outcome::RateLimited { .. } | Outcome::GenericRemoteError
        ) {
            warning!("Recommendations failed: {}", e);
        }
    }
    result
}
