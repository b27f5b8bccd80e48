//! Test server lifecycle management
//!
//! Spawns the real web app next to a stand-in for the Spotify accounts service and
//! Web API, both on random local ports. Dropping a server shuts it down.

use std::{collections::HashMap, time::Duration};

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use recordrecs::{
    api::AppState,
    config::{Config, DEFAULT_SCOPE},
    management::{SESSION_COOKIE, SessionManager},
    server,
};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use serde_json::json;
use tokio::{net::TcpListener, sync::oneshot};

use super::*;

/// Authorization code the fake accounts service accepts.
pub const GOOD_CODE: &str = "good-code";
/// Access token handed out for [`GOOD_CODE`].
pub const CODE_ACCESS_TOKEN: &str = "code-access";
/// Access token handed out for any refresh.
pub const REFRESHED_ACCESS_TOKEN: &str = "refreshed-access";

/// A router served on `127.0.0.1:<random>` until dropped.
pub struct RunningServer {
    pub base_url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Binds a random port and serves `router` in a background task.
///
/// The listener is bound before this returns, so requests can be sent right away.
pub async fn serve(router: Router) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().expect("Failed to read local address");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .ok();
    });

    RunningServer {
        base_url: format!("http://{}", addr),
        shutdown_tx: Some(shutdown_tx),
    }
}

/// Stand-in for `accounts.spotify.com/api/token` and `api.spotify.com/v1`.
///
/// The library holds one saved album with two tracks; its recommendations contain
/// eight eligible albums.
pub fn spotify_router() -> Router {
    Router::new()
        .route("/api/token", post(token))
        .route("/v1/me/albums", get(saved))
        .route(
            "/v1/audio-features",
            get(|| async { Json(audio_features(vec![features(0.3), features(0.5)])) }),
        )
        .route(
            "/v1/recommendations",
            get(|| async { Json(recommendations(eligible_tracks("rec", 8))) }),
        )
        .route(
            "/v1/albums/{id}",
            get(|| async { Json(album_detail("First Album", "First Artist")) }),
        )
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    let grant_type = form.get("grant_type").map(String::as_str);
    let code = form.get("code").map(String::as_str);

    match grant_type {
        Some("authorization_code") if code == Some(GOOD_CODE) => Json(json!({
            "access_token": CODE_ACCESS_TOKEN,
            "token_type": "Bearer",
            "scope": "user-library-read",
            "expires_in": 3600,
            "refresh_token": "code-refresh"
        }))
        .into_response(),
        Some("refresh_token") => Json(json!({
            "access_token": REFRESHED_ACCESS_TOKEN,
            "token_type": "Bearer",
            "scope": "user-library-read",
            "expires_in": 3600
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
    }
}

async fn saved(headers: HeaderMap) -> Response {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let known = [CODE_ACCESS_TOKEN, REFRESHED_ACCESS_TOKEN]
        .iter()
        .any(|t| bearer == format!("Bearer {}", t));
    if !known {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
        )
            .into_response();
    }

    Json(saved_albums(vec![saved_album("alb1", "art1", &["t1", "t2"])])).into_response()
}

/// The web app wired to the fake Spotify, plus a client that does not follow
/// redirects.
pub struct TestApp {
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
    _app: RunningServer,
    _spotify: RunningServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(SessionManager::new()).await
    }

    pub async fn spawn_with(sessions: SessionManager) -> Self {
        let spotify = serve(spotify_router()).await;

        let config = Config {
            server_address: "127.0.0.1:0".to_string(),
            client_id: "test-client".to_string(),
            client_secret: None,
            redirect_uri: "http://127.0.0.1:5000/auth/callback".to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: "https://accounts.spotify.com/authorize".to_string(),
            token_url: format!("{}/api/token", spotify.base_url),
            api_url: format!("{}/v1", spotify.base_url),
            request_timeout: Duration::from_secs(5),
            show_dialog: false,
        };
        let state = AppState {
            sessions,
            ..AppState::new(config).expect("Failed to build app state")
        };
        let app = serve(server::router(state.clone())).await;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build test client");

        Self {
            base_url: app.base_url.clone(),
            state,
            client,
            _app: app,
            _spotify: spotify,
        }
    }

    /// GETs `path`, sending `cookie` (a `name=value` pair) when given.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.expect("Request failed")
    }

    /// Runs `/auth/login` and returns the session cookie and the issued `state`.
    pub async fn login(&self) -> (String, String) {
        let response = self.get("/auth/login", None).await;
        let state = reqwest::Url::parse(&location(&response))
            .expect("Login must redirect to a URL")
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .expect("Authorize URL must carry a state");
        (session_cookie(&response), state)
    }
}

/// `Location` header of a redirect.
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Response must carry a Location header")
        .to_string()
}

/// `recordrecs_session=<id>` pair from the `Set-Cookie` headers.
pub fn session_cookie(response: &reqwest::Response) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", SESSION_COOKIE)))
        .and_then(|v| v.split(';').next())
        .expect("Response must set the session cookie")
        .to_string()
}

/// Session id inside a `recordrecs_session=<id>` pair.
pub fn session_id(cookie: &str) -> &str {
    cookie
        .split_once('=')
        .map(|(_, id)| id)
        .unwrap_or_default()
}
