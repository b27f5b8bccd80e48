use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, time::Duration};

use crate::{Res, api, api::AppState, info, management::SessionManager};

/// How often idle sessions are swept from the in-memory store.
pub const SESSION_PRUNE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Builds the application router with `state` attached to every handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/auth/login", get(api::login))
        .route("/auth/callback", get(api::callback))
        .route("/refresh-token", get(api::refresh_token))
        .route("/recs", get(api::recs))
        .route("/api/recs", get(api::recs_json))
        .route("/logout", get(api::logout))
        .layer(Extension(state))
}

/// Starts the web server for the recommendation app.
///
/// Binds to `addr`, spawns the background task that prunes idle sessions and serves
/// the router until the process is stopped.
///
/// # Arguments
///
/// * `state` - Shared application state (configuration, sessions, Spotify client)
/// * `addr` - Socket address to bind to, e.g. `127.0.0.1:5000`
///
/// # Errors
///
/// Returns an error if the address cannot be parsed, the port cannot be bound, or
/// the server stops with an I/O error.
pub async fn start_api_server(state: AppState, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    spawn_session_pruner(state.sessions.clone(), SESSION_PRUNE_INTERVAL);

    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Periodically drops sessions that have been idle for longer than their TTL.
pub fn spawn_session_pruner(
    sessions: SessionManager,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // the first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let pruned = sessions.prune().await;
            if pruned > 0 {
                info!("Pruned {} idle sessions.", pruned);
            }
        }
    })
}
