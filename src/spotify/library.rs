use crate::{
    error::RecError,
    management::CredentialContext,
    spotify::{RemoteApi, fetch_json},
    types::{GetAlbumResponse, SavedAlbumsResponse},
};

/// Number of recently saved albums used as seeds.
pub const SEED_PAGE_SIZE: u32 = 5;

/// Path of one page of the listener's saved albums, most recently saved first.
pub fn saved_albums_path(limit: u32, offset: u32) -> String {
    format!("me/albums?limit={limit}&offset={offset}")
}

/// Fetches the first page of the listener's saved albums, most recently saved first.
pub async fn get_saved_albums<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
) -> Result<SavedAlbumsResponse, RecError> {
    fetch_json(api, credential, &saved_albums_path(SEED_PAGE_SIZE, 0)).await
}

/// Fetches one album to show its name and primary artist in the intro sentence.
///
/// # Errors
///
/// Any classified failure of the call, see [`fetch_json`].
pub async fn get_album<A: RemoteApi + ?Sized>(
    api: &A,
    credential: &CredentialContext,
    album_id: &str,
) -> Result<GetAlbumResponse, RecError> {
    fetch_json(api, credential, &format!("albums/{}", album_id)).await
}
