use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::api::AppState;

/// Health check endpoint for monitoring.
///
/// # Returns
///
/// JSON with a fixed `"status": "ok"`, the package name and version, and the number
/// of sessions currently held in memory:
///
/// ```json
/// { "status": "ok", "name": "recordrecs", "version": "0.1.0-dev", "sessions": 3 }
/// ```
pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.count().await
    }))
}
