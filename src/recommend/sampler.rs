use rand::{Rng, seq::index};

use crate::{
    types::{CandidateAlbum, ContentBlock, GetAlbumResponse},
    utils,
};

/// Number of albums shown per seed.
pub const SAMPLE_SIZE: usize = 6;

/// Draws `min(size, len)` distinct indices into a pool of `len`, uniformly and
/// without replacement. Never panics on a short pool.
pub fn sample_indices<R: Rng + ?Sized>(len: usize, size: usize, rng: &mut R) -> Vec<usize> {
    index::sample(rng, len, size.min(len)).into_vec()
}

/// Picks `size` distinct candidates uniformly at random, or all of them in random
/// order when the pool is smaller. An empty pool yields an empty pick.
pub fn sample<R: Rng + ?Sized>(
    candidates: &[CandidateAlbum],
    size: usize,
    rng: &mut R,
) -> Vec<CandidateAlbum> {
    sample_indices(candidates.len(), size, rng)
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect()
}

/// One intro block naming the seed album, then one album block per pick, in order.
pub fn present(seed: &GetAlbumResponse, picks: &[CandidateAlbum]) -> Vec<ContentBlock> {
    let artist_name = seed
        .artists
        .first()
        .map(|a| a.name.as_str())
        .unwrap_or_default();

    let mut blocks = Vec::with_capacity(picks.len() + 1);
    blocks.push(ContentBlock::Text {
        text: utils::intro_text(&seed.name, artist_name),
    });
    blocks.extend(picks.iter().map(|c| ContentBlock::Album {
        title: c.album_name.clone(),
        artist: c.artist_name.clone(),
        image_url: c.image_url.clone(),
        link: c.external_link.clone(),
    }));
    blocks
}
