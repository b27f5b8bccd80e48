use crate::{
    error::RecError,
    management::CredentialContext,
    spotify::{RemoteApi, fetch_json},
    types::{AudioFeaturesResponse, FeatureTarget, RecommendationsResponse},
};

/// Audio features for a batch of tracks. The response holds one entry per requested
/// id, in request order, with `null` for tracks that have no analysis.
pub async fn get_audio_features<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
    track_ids: &[String],
) -> Result<AudioFeaturesResponse, RecError> {
    let path = format!("audio-features?ids={}", track_ids.join(","));
    fetch_json(api, credential, &path).await
}

/// Path of a recommendations query seeded by one artist and steered by the five
/// `target_*` values.
///
/// # Example
///
/// ```text
/// recommendations?seed_artists=4Z8W4fKeB5YxbusRsdQVPb&target_acousticness=0.5&target_danceability=0.25&...
/// ```
pub fn recommendations_path(artist_id: &str, target: &FeatureTarget) -> String {
    format!(
        "recommendations?seed_artists={artist_id}&target_acousticness={acousticness}&target_danceability={danceability}&target_instrumentalness={instrumentalness}&target_speechiness={speechiness}&target_valence={valence}",
        artist_id = artist_id,
        acousticness = target.acousticness,
        danceability = target.danceability,
        instrumentalness = target.instrumentalness,
        speechiness = target.speechiness,
        valence = target.valence,
    )
}

/// Track recommendations seeded by one artist and steered towards `target`.
/// The returned order is the upstream relevance ranking.
pub async fn get_recommendations<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
    artist_id: &str,
    target: &FeatureTarget,
) -> Result<RecommendationsResponse, RecError> {
    fetch_json(api, credential, &recommendations_path(artist_id, target)).await
}
