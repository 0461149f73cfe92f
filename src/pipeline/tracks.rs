use crate::{catalog::Catalog, error::CatalogError, types::Track};

/// Fetches an artist's top tracks and truncates to `limit`.
///
/// Truncation follows the catalog's own popularity ordering; nothing is
/// re-ranked locally. Fewer than `limit` tracks is a normal result. A limit
/// below 1 is clamped to 1.
pub async fn select_top_tracks(
    catalog: &dyn Catalog,
    artist_id: &str,
    limit: usize,
) -> Result<Vec<Track>, CatalogError> {
    let limit = limit.max(1);
    let mut tracks = catalog.top_tracks(artist_id).await?;
    tracks.truncate(limit);
    Ok(tracks)
}
