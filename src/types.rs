use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// OAuth token of a logged-in listener.
///
/// `obtained_at` is a Unix timestamp in seconds; together with `expires_in` it gives
/// the instant after which the access token is rejected by Spotify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Instant after which the access token must no longer be used.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let expires_at = self.obtained_at.saturating_add(self.expires_in);
        DateTime::<Utc>::from_timestamp(i64::try_from(expires_at).ok()?, 0)
    }
}

/// Body of a successful token exchange or refresh at the accounts service.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Login handshake data kept between `/auth/login` and `/auth/callback`.
#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
}

// Wire types for the Spotify Web API. Only the fields the engine reads are modelled.

/// One page of `GET me/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbumsResponse {
    pub items: Vec<SavedAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub album: LibraryAlbum,
}

/// A saved album with its full track listing in album order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryAlbum {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub artists: Vec<AlbumArtist>,
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRef {
    pub id: String,
}

/// Body of `GET audio-features?ids=...`. Entries are positional and `null` for
/// tracks Spotify has not analysed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatureVector>>,
}

/// The five audio features used to steer recommendations, each in `0.0..=1.0`.
/// Other fields of the response (tempo, key, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatureVector {
    pub acousticness: f64,
    pub danceability: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<RecommendedTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTrack {
    pub album: RecommendedAlbum,
}

/// Parent album of a recommended track.
///
/// `album_type` is upper case in recommendation responses (`ALBUM`, `SINGLE`,
/// `COMPILATION`). Images come largest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAlbum {
    pub id: String,
    pub name: String,
    pub album_type: String,
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// The part of `GET albums/<id>` shown in the intro sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAlbumResponse {
    pub name: String,
    pub artists: Vec<AlbumArtist>,
}

// Request-scoped domain entities.

/// A recently saved album the recommendations for one section are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAlbum {
    pub album_id: String,
    pub artist_id: String,
    pub track_ids: Vec<String>,
}

/// A requested track id paired with the feature vector returned at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFeatures {
    pub track_id: String,
    pub features: Option<AudioFeatureVector>,
}

/// Mean audio features of a seed album, sent as the `target_*` parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureTarget {
    pub acousticness: f64,
    pub danceability: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub valence: f64,
}

/// A distinct, eligible album found in the recommendations for one seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAlbum {
    pub album_id: String,
    pub artist_name: String,
    pub album_name: String,
    pub image_url: Option<String>,
    pub external_link: Option<String>,
}

/// One renderable piece of the result: a seed's intro sentence or a recommended
/// album. Serialized as `{"type": "text", ...}` / `{"type": "album", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Album {
        title: String,
        artist: String,
        image_url: Option<String>,
        link: Option<String>,
    },
}

impl ContentBlock {
    /// "Title by Artist" for album blocks, `None` for text.
    pub fn caption(&self) -> Option<String> {
        match self {
            ContentBlock::Album { title, artist, .. } => Some(format!("{} by {}", title, artist)),
            ContentBlock::Text { .. } => None,
        }
    }
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub album: String,
    pub artist: String,
    pub link: String,
}
