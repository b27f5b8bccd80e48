use crate::{
    error::RecError,
    management::CredentialContext,
    spotify::{RemoteApi, tracks},
    types::{AudioFeatureVector, FeatureTarget, SeedAlbum, TrackFeatures},
};

/// Computes the mean audio-feature profile of a seed album in one batched call.
///
/// # Errors
///
/// - [`RecError::NoFeaturesAvailable`] when none of the seed's tracks has features;
///   the caller skips that seed
/// - [`RecError::Decode`] when the response does not hold one entry per track
/// - Any classified failure of the underlying call
pub async fn aggregate<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
    seed: &SeedAlbum,
) -> Result<FeatureTarget, RecError> {
    let response = tracks::get_audio_features(api, credential, &seed.track_ids).await?;
    let paired = pair(&seed.track_ids, response.audio_features)?;

    mean(&paired).ok_or_else(|| RecError::NoFeaturesAvailable {
        album_id: seed.album_id.clone(),
    })
}

/// Zips requested ids with the returned feature list.
///
/// The Web API answers positionally, one entry per requested id. A response of a
/// different length cannot be paired and is treated as malformed.
pub fn pair(
    track_ids: &[String],
    features: Vec<Option<AudioFeatureVector>>,
) -> Result<Vec<TrackFeatures>, RecError> {
    if track_ids.len() != features.len() {
        return Err(RecError::Decode(format!(
            "requested audio features for {} tracks but received {}",
            track_ids.len(),
            features.len()
        )));
    }

    Ok(track_ids
        .iter()
        .zip(features)
        .map(|(id, features)| TrackFeatures {
            track_id: id.clone(),
            features,
        })
        .collect())
}

/// Averages the tracks that have features. Tracks without analysis (spoken intros,
/// interludes) are left out of both the sums and the count.
///
/// Returns `None` when no track has features, including for an empty slice.
///
/// # Example
///
/// Acousticness values of `[0.2, null, 0.6, 0.4]` average to `0.4`: three tracks
/// are counted, not four.
pub fn mean(tracks: &[TrackFeatures]) -> Option<FeatureTarget> {
    let mut counted_tracks = 0usize;
    let mut total = FeatureTarget {
        acousticness: 0.0,
        danceability: 0.0,
        instrumentalness: 0.0,
        speechiness: 0.0,
        valence: 0.0,
    };

    for features in tracks.iter().filter_map(|t| t.features.as_ref()) {
        total.acousticness += features.acousticness;
        total.danceability += features.danceability;
        total.instrumentalness += features.instrumentalness;
        total.speechiness += features.speechiness;
        total.valence += features.valence;
        counted_tracks += 1;
    }

    if counted_tracks == 0 {
        return None;
    }

    let n = counted_tracks as f64;
    Some(FeatureTarget {
        acousticness: total.acousticness / n,
        danceability: total.danceability / n,
        instrumentalness: total.instrumentalness / n,
        speechiness: total.speechiness / n,
        valence: total.valence / n,
    })
}
