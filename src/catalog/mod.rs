//! # Catalog Integration Module
//!
//! This module provides the interface between the pipeline and the music
//! catalog. All catalog operations the pipeline needs are collected in the
//! [`Catalog`] trait; the production implementation talks to the Spotify
//! Web API, while tests substitute an in-process fake without any network
//! access.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline Layer (resolver, track selector, reconciler)
//!          ↓
//! Catalog Capability Trait
//!          ↓
//! Spotify Implementation (reqwest, JSON, token management)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Capabilities
//!
//! The trait mirrors exactly what the pipeline consumes:
//!
//! - **Artist search**: candidates for a raw display name, in the API's
//!   relevance order. Match selection happens in the pipeline, not here.
//! - **Top tracks**: an artist's top tracks in catalog popularity order.
//!   Truncation to N happens in the pipeline.
//! - **Playlist lookup**: the user's playlists filtered by name, and the
//!   current track ids of one playlist (paginated internally).
//! - **Playlist mutation**: create, add tracks, remove tracks, delete.
//!   Batching at the API's 100-item limit is done by the caller; one call
//!   here maps to one HTTP request.
//!
//! ## Error Handling
//!
//! Every operation returns [`CatalogError`](crate::error::CatalogError).
//! Transient failures are retried inside the implementation (3 attempts,
//! linearly increasing delay); 429 responses honor the `Retry-After` header
//! up to a cap. What callers see is the post-retry result: per-artist
//! callers record failures and continue, mutation callers abort the
//! remaining batches of the current phase.

pub mod spotify;

use async_trait::async_trait;

use crate::{
    error::CatalogError,
    types::{ArtistCandidate, Playlist, Track},
};

/// Catalog capability trait: the minimal set of operations the pipeline
/// needs. Implementations: [`spotify::SpotifyCatalog`] in production, a
/// fake in tests.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search the catalog for artists matching a raw display name.
    /// Candidates come back in the catalog's relevance order.
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistCandidate>, CatalogError>;

    /// Fetch an artist's top tracks in catalog popularity order.
    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>, CatalogError>;

    /// Return the user's playlists whose name equals `name` exactly.
    async fn find_playlists_by_name(&self, name: &str) -> Result<Vec<Playlist>, CatalogError>;

    /// Return the user's playlists whose name starts with `prefix`.
    async fn find_playlists_by_prefix(&self, prefix: &str) -> Result<Vec<Playlist>, CatalogError>;

    /// Return the current track ids of a playlist, in playlist order.
    async fn playlist_track_ids(&self, playlist_id: &str) -> Result<Vec<String>, CatalogError>;

    /// Create a private playlist and return it with its remote id set.
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Playlist, CatalogError>;

    /// Add tracks to a playlist. One call per batch; the caller splits at
    /// the API's batch-size limit.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String])
    -> Result<(), CatalogError>;

    /// Remove tracks from a playlist. Same batching contract as
    /// [`add_tracks`](Catalog::add_tracks).
    async fn remove_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), CatalogError>;

    /// Delete (unfollow) a playlist.
    async fn delete_playlist(&self, playlist_id: &str) -> Result<(), CatalogError>;
}
