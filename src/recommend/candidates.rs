use std::collections::HashSet;

use crate::{
    error::RecError,
    management::CredentialContext,
    spotify::{RemoteApi, tracks},
    types::{CandidateAlbum, FeatureTarget, RecommendedTrack, SeedAlbum},
};

/// Maximum number of distinct candidate albums kept per seed.
pub const CANDIDATE_CAP: usize = 20;

/// Only full-length albums are recommended, never singles or compilations.
pub const ELIGIBLE_ALBUM_TYPE: &str = "ALBUM";

/// Asks for recommendations around the seed's artist and feature profile and keeps
/// the parent albums worth showing.
pub async fn expand<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
    seed: &SeedAlbum,
    target: &FeatureTarget,
) -> Result<Vec<CandidateAlbum>, RecError> {
    let response = tracks::get_recommendations(api, credential, &seed.artist_id, target).await?;
    Ok(select(&seed.album_id, &response.tracks))
}

/// Walks the tracks in upstream order and accepts each parent album that is an
/// "ALBUM", is not the seed itself, and has not been accepted yet.
///
/// # Arguments
///
/// * `seed_album_id` - Album the recommendations were derived from; never accepted
/// * `tracks` - Recommended tracks in upstream relevance order. Any iterator works,
///   which lets callers observe how far the scan went.
///
/// # Returns
///
/// Distinct candidate albums in the order they were first seen, at most
/// [`CANDIDATE_CAP`] of them. Stops pulling tracks as soon as the cap is reached.
///
/// # Display Fields
///
/// - `image_url` - `images[1]` (medium), else `images[0]`, else `None`
/// - `external_link` - `external_urls.spotify`, else the `spotify:album:` URI
/// - `artist_name` - First listed artist, empty when there is none
pub fn select<'a, I>(seed_album_id: &str, tracks: I) -> Vec<CandidateAlbum>
where
    I: IntoIterator<Item = &'a RecommendedTrack>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates = Vec::new();

    for track in tracks {
        let album = &track.album;
        if album.album_type != ELIGIBLE_ALBUM_TYPE
            || album.id == seed_album_id
            || !seen.insert(album.id.as_str())
        {
            continue;
        }

        candidates.push(CandidateAlbum {
            album_id: album.id.clone(),
            artist_name: album
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            album_name: album.name.clone(),
            // images come largest first; index 1 is the medium size
            image_url: album
                .images
                .get(1)
                .or_else(|| album.images.first())
                .map(|i| i.url.clone()),
            external_link: album
                .external_urls
                .spotify
                .clone()
                .or_else(|| album.uri.clone()),
        });

        if candidates.len() == CANDIDATE_CAP {
            break;
        }
    }

    candidates
}
