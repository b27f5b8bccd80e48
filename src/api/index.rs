use axum::response::Html;

use crate::api::pages;

/// Welcome page with the "Login with Spotify" link.
pub async fn index() -> Html<String> {
    Html(pages::index_page())
}
