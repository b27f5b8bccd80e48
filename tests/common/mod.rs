#![allow(dead_code)]

pub mod server;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use recordrecs::{
    error::RecError,
    management::CredentialContext,
    spotify::{RawResponse, RemoteApi},
};
use serde_json::{Value, json};

/// Scripted stand-in for the Web API: answers by path prefix and records every call.
pub struct MockApi {
    routes: Vec<(String, Result<RawResponse, RecError>)>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, prefix: &str, response: Result<RawResponse, RecError>) -> Self {
        self.routes.push((prefix.to_string(), response));
        self
    }

    pub fn json(self, prefix: &str, body: Value) -> Self {
        self.respond(prefix, Ok(RawResponse::ok(body.to_string())))
    }

    pub fn status(self, prefix: &str, status: u16, body: &str) -> Self {
        self.respond(
            prefix,
            Ok(RawResponse {
                status,
                retry_after: None,
                body: body.to_string(),
            }),
        )
    }

    pub fn rate_limited(self, prefix: &str, retry_after: Option<u64>) -> Self {
        self.respond(
            prefix,
            Ok(RawResponse {
                status: 429,
                retry_after,
                body: String::new(),
            }),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteApi for MockApi {
    async fn get(&self, path: &str, bearer: &str) -> Result<RawResponse, RecError> {
        assert!(!bearer.is_empty(), "remote call without bearer token");
        self.calls.lock().unwrap().push(path.to_string());

        self.routes
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| {
                Ok(RawResponse {
                    status: 404,
                    retry_after: None,
                    body: format!("no route for {}", path),
                })
            })
    }
}

pub const SAVED_ALBUMS_PATH: &str = "me/albums?limit=5&offset=0";

pub fn credential() -> CredentialContext {
    CredentialContext::new("test-token", Utc::now() + Duration::hours(1))
}

pub fn saved_album(id: &str, artist_id: &str, tracks: &[&str]) -> Value {
    json!({
        "added_at": "2024-01-01T00:00:00Z",
        "album": {
            "id": id,
            "name": format!("Saved {}", id),
            "artists": [{ "id": artist_id, "name": format!("Artist {}", artist_id) }],
            "tracks": {
                "items": tracks.iter().map(|t| json!({ "id": t, "name": format!("Track {}", t) })).collect::<Vec<_>>()
            }
        }
    })
}

pub fn saved_albums(items: Vec<Value>) -> Value {
    json!({ "items": items, "limit": 5, "offset": 0 })
}

pub fn features(value: f64) -> Value {
    json!({
        "acousticness": value,
        "danceability": value,
        "instrumentalness": value,
        "speechiness": value,
        "valence": value,
        "tempo": 120.0
    })
}

pub fn audio_features(entries: Vec<Value>) -> Value {
    json!({ "audio_features": entries })
}

pub fn rec_track(album_id: &str, album_type: &str) -> Value {
    json!({
        "id": format!("track-of-{}", album_id),
        "album": {
            "id": album_id,
            "name": format!("Album {}", album_id),
            "album_type": album_type,
            "artists": [{ "id": format!("artist-of-{}", album_id), "name": format!("Artist of {}", album_id) }],
            "images": [
                { "url": format!("https://i.scdn.co/{}/640", album_id) },
                { "url": format!("https://i.scdn.co/{}/300", album_id) },
                { "url": format!("https://i.scdn.co/{}/64", album_id) }
            ],
            "external_urls": { "spotify": format!("https://open.spotify.com/album/{}", album_id) },
            "uri": format!("spotify:album:{}", album_id)
        }
    })
}

pub fn recommendations(tracks: Vec<Value>) -> Value {
    json!({ "tracks": tracks, "seeds": [] })
}

pub fn album_detail(name: &str, artist: &str) -> Value {
    json!({ "name": name, "artists": [{ "id": "x", "name": artist }] })
}

/// `count` distinct eligible recommendation tracks named `<prefix>0..`.
pub fn eligible_tracks(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| rec_track(&format!("{}{}", prefix, i), "ALBUM"))
        .collect()
}
