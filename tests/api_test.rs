use axum::http::StatusCode;
use recordrecs::{
    api::{outcome_status, pages},
    cli::to_sections,
    error::{Outcome, RecError},
    types::ContentBlock,
};
use serde_json::json;

fn album(title: &str, artist: &str) -> ContentBlock {
    ContentBlock::Album {
        title: title.to_string(),
        artist: artist.to_string(),
        image_url: Some(format!("https://i.scdn.co/{}", title)),
        link: Some(format!("https://open.spotify.com/album/{}", title)),
    }
}

fn intro(text: &str) -> ContentBlock {
    ContentBlock::Text {
        text: text.to_string(),
    }
}

#[test]
fn test_outcome_mapping() {
    assert_eq!(RecError::NotAuthenticated.outcome(), Outcome::NeedsLogin);
    assert_eq!(RecError::CredentialExpired.outcome(), Outcome::NeedsRefresh);
    assert_eq!(RecError::EmptyLibrary.outcome(), Outcome::EmptyLibrary);
    assert_eq!(
        RecError::RateLimited {
            retry_after: Some(3)
        }
        .outcome(),
        Outcome::RateLimited {
            retry_after: Some(3)
        }
    );
    for e in [
        RecError::RemoteApi {
            status: 500,
            body: String::new(),
        },
        RecError::Transport("reset".to_string()),
        RecError::Decode("eof".to_string()),
    ] {
        assert_eq!(e.outcome(), Outcome::GenericRemoteError);
    }
}

#[test]
fn test_outcome_status_codes() {
    assert_eq!(outcome_status(Outcome::NeedsLogin), StatusCode::UNAUTHORIZED);
    assert_eq!(outcome_status(Outcome::NeedsRefresh), StatusCode::UNAUTHORIZED);
    assert_eq!(outcome_status(Outcome::EmptyLibrary), StatusCode::OK);
    assert_eq!(
        outcome_status(Outcome::RateLimited { retry_after: None }),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        outcome_status(Outcome::GenericRemoteError),
        StatusCode::BAD_GATEWAY
    );
}

#[test]
fn test_outcome_serialization() {
    assert_eq!(
        serde_json::to_value(Outcome::RateLimited {
            retry_after: Some(30)
        })
        .unwrap(),
        json!({ "kind": "rate_limited", "retry_after": 30 })
    );
    assert_eq!(
        serde_json::to_value(Outcome::NeedsLogin).unwrap(),
        json!({ "kind": "needs_login" })
    );
}

#[test]
fn test_content_block_serialization() {
    assert_eq!(
        serde_json::to_value(intro("hello")).unwrap(),
        json!({ "type": "text", "text": "hello" })
    );
    assert_eq!(
        serde_json::to_value(ContentBlock::Album {
            title: "T".to_string(),
            artist: "A".to_string(),
            image_url: None,
            link: None,
        })
        .unwrap(),
        json!({ "type": "album", "title": "T", "artist": "A", "image_url": null, "link": null })
    );
}

#[test]
fn test_recs_page_groups_albums_under_their_intro() {
    let html = pages::recs_page(&[
        intro("Because you listened to One by Someone, we think you might enjoy:"),
        album("a1", "X"),
        album("a2", "Y"),
        intro("Because you listened to Two by Someone, we think you might enjoy:"),
        album("b1", "Z"),
    ]);

    assert_eq!(html.matches("<section class=\"seed\">").count(), 2);
    assert_eq!(html.matches("<div class=\"album\">").count(), 3);
    assert!(html.contains("a1 by X"));
    assert!(html.contains("href=\"https://open.spotify.com/album/b1\""));
    assert!(html.contains("src=\"https://i.scdn.co/a2\""));

    let first = html.find("One by Someone").unwrap();
    let second = html.find("Two by Someone").unwrap();
    assert!(first < html.find("a2 by Y").unwrap());
    assert!(html.find("a2 by Y").unwrap() < second);
    assert!(second < html.find("b1 by Z").unwrap());
}

#[test]
fn test_recs_page_escapes_remote_text() {
    let html = pages::recs_page(&[
        intro("Because you listened to <b>Bold</b> by A&B, we think you might enjoy:"),
        album("<script>x</script>", "\"Quoted\""),
    ]);

    assert!(!html.contains("<script>x</script>"));
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt; by &quot;Quoted&quot;"));
    assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; by A&amp;B"));
}

#[test]
fn test_recs_page_without_image_or_link() {
    let html = pages::recs_page(&[
        intro("intro"),
        ContentBlock::Album {
            title: "Bare".to_string(),
            artist: "Nobody".to_string(),
            image_url: None,
            link: None,
        },
    ]);

    assert!(html.contains("Bare by Nobody"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("target=\"_blank\""));
}

#[test]
fn test_recs_page_empty_content() {
    let html = pages::recs_page(&[]);
    assert!(html.contains("could not find any new albums"));
    assert!(!html.contains("<section"));
}

#[test]
fn test_outcome_pages() {
    assert!(pages::rate_limited_page(Some(42)).contains("try again in 42 seconds"));
    assert!(pages::rate_limited_page(None).contains("a little while"));
    assert!(pages::empty_library_page().contains("no saved albums"));
    assert!(pages::remote_error_page().contains("problem talking to Spotify"));
    assert!(pages::login_failed_page("<state mismatch>").contains("&lt;state mismatch&gt;"));
    assert!(pages::index_page().contains("href=\"/auth/login\""));
    assert!(pages::loading_page().contains("url=/recs"));
}

#[test]
fn test_to_sections() {
    let sections = to_sections(&[
        intro("first"),
        album("a1", "X"),
        album("a2", "Y"),
        intro("second"),
        album("b1", "Z"),
    ]);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].0, "first");
    assert_eq!(sections[0].1.len(), 2);
    assert_eq!(sections[0].1[1].album, "a2");
    assert_eq!(sections[0].1[1].artist, "Y");
    assert_eq!(sections[1].0, "second");
    assert_eq!(sections[1].1[0].link, "https://open.spotify.com/album/b1");
}

#[test]
fn test_to_sections_empty() {
    assert!(to_sections(&[]).is_empty());
}
