//! HTML pages of the web app.
//!
//! Pages are small enough to be assembled from format strings. Every piece of text
//! that originates from Spotify is escaped before it is embedded.

use crate::{types::ContentBlock, utils::escape_html};

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#222}\
.seed{margin-top:2rem}\
.albums{display:flex;flex-wrap:wrap;gap:1rem}\
.album{width:200px}\
.album img{width:200px;height:200px;object-fit:cover}\
.album p{margin:.4rem 0}";

pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head><body><h1>RecordRecs</h1>{body}</body></html>",
        title = escape_html(title),
        body = body
    )
}

pub fn index_page() -> String {
    layout(
        "Welcome",
        "<p>Discover new albums based on the records you saved most recently.</p>\
<p><a href=\"/auth/login\">Login with Spotify</a></p>",
    )
}

/// Shown right after login; forwards to `/recs`, which can take a few seconds.
pub fn loading_page() -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><meta http-equiv=\"refresh\" content=\"0; url=/recs\"><title>Loading</title><style>{STYLE}</style></head><body><h1>RecordRecs</h1><p>Finding albums you might enjoy...</p></body></html>"
    )
}

pub fn recs_page(content: &[ContentBlock]) -> String {
    if content.is_empty() {
        return layout(
            "Recommendations",
            "<p>We could not find any new albums for your recent saves this time. Try again later.</p>\
<p><a href=\"/recs\">Try again</a></p>",
        );
    }

    let mut body = String::new();
    let mut open_section = false;

    for block in content {
        match block {
            ContentBlock::Text { text } => {
                if open_section {
                    body.push_str("</div></section>");
                }
                body.push_str(&format!(
                    "<section class=\"seed\"><p><b>{}</b></p><div class=\"albums\">",
                    escape_html(text)
                ));
                open_section = true;
            }
            ContentBlock::Album { .. } => body.push_str(&album_block(block)),
        }
    }
    if open_section {
        body.push_str("</div></section>");
    }
    body.push_str("<p><a href=\"/recs\">More recommendations</a> | <a href=\"/logout\">Logout</a></p>");

    layout("Recommendations", &body)
}

fn album_block(block: &ContentBlock) -> String {
    let ContentBlock::Album {
        image_url, link, ..
    } = block
    else {
        return String::new();
    };
    let caption = escape_html(&block.caption().unwrap_or_default());

    let image = match image_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(url),
            caption
        ),
        None => String::new(),
    };
    let image = match link {
        Some(link) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(link),
            image
        ),
        None => image,
    };

    format!("<div class=\"album\">{}<p>{}</p></div>", image, caption)
}

pub fn empty_library_page() -> String {
    layout(
        "No saved albums",
        "<p>Your library has no saved albums yet. Save a few albums on Spotify and come back for recommendations.</p>\
<p><a href=\"/recs\">Try again</a></p>",
    )
}

pub fn rate_limited_page(retry_after: Option<u64>) -> String {
    let wait = match retry_after {
        Some(secs) => format!("Please try again in {} seconds.", secs),
        None => "Please try again in a little while.".to_string(),
    };
    layout(
        "Too many requests",
        &format!(
            "<p>Spotify is receiving too many requests from RecordRecs right now. {}</p>\
<p><a href=\"/recs\">Try again</a></p>",
            wait
        ),
    )
}

pub fn remote_error_page() -> String {
    layout(
        "Something went wrong",
        "<p>There was a problem talking to Spotify. Please try again.</p>\
<p><a href=\"/\">Back to start</a></p>",
    )
}

pub fn login_failed_page(reason: &str) -> String {
    layout(
        "Login failed",
        &format!(
            "<p>Login failed: {}</p><p><a href=\"/auth/login\">Login with Spotify</a></p>",
            escape_html(reason)
        ),
    )
}
