use crate::{
    error::RecError,
    management::CredentialContext,
    spotify::{RemoteApi, library},
    types::{SavedAlbumsResponse, SeedAlbum},
    warning,
};

/// Fetches the listener's most recently saved albums and turns them into seeds.
///
/// Fails with [`RecError::EmptyLibrary`] when the library page has no items.
pub async fn collect<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
) -> Result<Vec<SeedAlbum>, RecError> {
    let saved = library::get_saved_albums(api, credential).await?;
    if saved.items.is_empty() {
        return Err(RecError::EmptyLibrary);
    }

    Ok(extract(saved))
}

/// Extracts album id, primary artist id and ordered track ids, keeping library order.
///
/// Items without an artist or without tracks cannot seed anything and are dropped.
pub fn extract(saved: SavedAlbumsResponse) -> Vec<SeedAlbum> {
    let mut seeds = Vec::with_capacity(saved.items.len());

    for item in saved.items {
        let album = item.album;
        let Some(artist) = album.artists.first() else {
            warning!("Saved album {} has no artists, skipping it.", album.id);
            continue;
        };
        if album.tracks.items.is_empty() {
            warning!("Saved album {} has no tracks, skipping it.", album.id);
            continue;
        }

        seeds.push(SeedAlbum {
            artist_id: artist.id.clone(),
            track_ids: album.tracks.items.into_iter().map(|t| t.id).collect(),
            album_id: album.id,
        });
    }

    seeds
}
