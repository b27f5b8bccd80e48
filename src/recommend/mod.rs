//! # Recommendation Engine
//!
//! Expands the listener's recently saved albums into a handful of discovery albums:
//!
//! ```text
//! seeds::collect        GET me/albums?limit=5&offset=0
//!     ↓ (per seed album, in library order)
//! features::aggregate   GET audio-features?ids=<csv>
//!     ↓
//! candidates::expand    GET recommendations?seed_artists=..&target_*=..
//!     ↓
//! library::get_album    GET albums/<id>
//!     ↓
//! sampler::sample + sampler::present
//! ```
//!
//! Seeds are processed one after another and their blocks are concatenated in seed
//! order. Any classified remote failure (transport, status, rate limit, decoding)
//! aborts the whole request with no partial content. Two per-seed conditions
//! degrade instead: a seed whose tracks have no audio features is skipped, and a
//! seed with fewer than [`SAMPLE_SIZE`] candidates shows all it has (or is skipped
//! when it has none).

pub mod candidates;
pub mod features;
pub mod sampler;
pub mod seeds;

use rand::Rng;

use crate::{
    error::RecError,
    management::CredentialContext,
    spotify::{RemoteApi, library},
    types::ContentBlock,
    warning,
};

pub use candidates::CANDIDATE_CAP;
pub use sampler::SAMPLE_SIZE;

/// Runs the full traversal for one request and returns the blocks to render.
///
/// The credential is checked up front, so a missing or expired token returns
/// before any remote call is made. Each seed contributes one intro block followed by
/// up to [`SAMPLE_SIZE`] album blocks; seeds appear in library order.
///
/// # Arguments
///
/// * `api` - Web API transport, the real [`SpotifyClient`](crate::spotify::SpotifyClient)
///   or a scripted fake
/// * `credential` - Bearer token of the listener, checked before every call
/// * `rng` - Source of randomness for sampling; pass a seeded `StdRng` for
///   reproducible output
///
/// # Returns
///
/// - `Ok(blocks)` - Intro and album blocks, possibly empty when no seed produced a
///   candidate
/// - `Err(RecError::NotAuthenticated)` / `Err(RecError::CredentialExpired)` - The
///   credential cannot be used; no call was made
/// - `Err(RecError::EmptyLibrary)` - The listener has no saved albums
/// - `Err(RecError::RateLimited { .. })` - Any call answered 429; the traversal stops
///   there
/// - `Err(RecError::RemoteApi { .. })`, `Transport` or `Decode` - Any other failed
///   call
///
/// # Call Budget
///
/// One library call plus at most three calls per seed (audio features,
/// recommendations, album details), so at most 16 calls per request. A seed that is
/// skipped makes fewer.
///
/// # Example
///
/// ```
/// let mut rng = StdRng::from_os_rng();
/// let credential = CredentialContext::new(token, expires_at);
/// let blocks = recommend::discover(&client, &credential, &mut rng).await?;
/// ```
pub async fn discover<A, R>(
    api: &A,
    credential: &CredentialContext,
    rng: &mut R,
) -> Result<Vec<ContentBlock>, RecError>
where
    A: RemoteApi + ?Sized,
    R: Rng + ?Sized,
{
    credential.bearer()?;

    let seeds = seeds::collect(api, credential).await?;
    let mut content = Vec::new();

    for seed in &seeds {
        let target = match features::aggregate(api, credential, seed).await {
            Ok(target) => target,
            Err(RecError::NoFeaturesAvailable { album_id }) => {
                warning!(
                    "No audio features for any track of album {}, skipping it.",
                    album_id
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        let pool = candidates::expand(api, credential, seed, &target).await?;
        if pool.is_empty() {
            warning!(
                "No eligible albums recommended for album {}, skipping it.",
                seed.album_id
            );
            continue;
        }
        if pool.len() < SAMPLE_SIZE {
            warning!(
                "Only {} eligible albums recommended for album {}, showing all of them.",
                pool.len(),
                seed.album_id
            );
        }

        let album = library::get_album(api, credential, &seed.album_id).await?;
        let picks = sampler::sample(&pool, SAMPLE_SIZE, rng);
        content.extend(sampler::present(&album, &picks));
    }

    Ok(content)
}
