use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Festivals with a known lineup source.
///
/// Each variant selects a lineup file-naming and parsing strategy at
/// load time; dispatch happens by tag in the `lineup` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Festival {
    Wacken,
    Partysan,
    MetalInSachsen,
}

impl Festival {
    /// Stable lowercase key used for file paths and playlist names.
    pub fn key(&self) -> &'static str {
        match self {
            Festival::Wacken => "wacken",
            Festival::Partysan => "partysan",
            Festival::MetalInSachsen => "metal_in_sachsen",
        }
    }
}

impl fmt::Display for Festival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    /// Filled by resolution; stays `None` for unresolved artists, which are
    /// reported but never dropped from the lineup.
    pub catalog_id: Option<String>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    /// Catalog-assigned popularity position (0 = most popular). Only used
    /// for top-N truncation, never re-ranked locally.
    pub rank: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    pub festival: Festival,
    pub year: i32,
    /// Source order; preserved through the pipeline for deterministic
    /// playlist track ordering.
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub remote_id: Option<String>,
    pub name: String,
    /// No duplicates; reconciliation treats membership as a set, creation
    /// keeps this order.
    pub track_ids: Vec<String>,
}

/// Minimal set of additions/removals that converges a playlist to a target
/// track list. Derived value, consumed once by `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// One exported playlist row: artist display name plus the selected track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub artist: String,
    pub track_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

// --- Spotify Web API wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<ArtistCandidate>,
}

/// One result from the catalog's artist search, in API relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistCandidate {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<PlaylistObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

// --- Report table rows ---

#[derive(Tabled)]
pub struct ArtistReportRow {
    pub artist: String,
    pub status: String,
    pub tracks: usize,
}
