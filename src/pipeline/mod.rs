//! The lineup resolution and playlist synchronization pipeline.
//!
//! Linear run states: LoadLineup → ResolveArtists → FetchTracks → Aggregate
//! → Reconcile → Report. A missing lineup is fatal; everything the catalog
//! fails to answer for a single artist is collected as a per-artist outcome
//! and the run keeps going.

mod orchestrator;
mod reconcile;
mod report;
mod resolver;
mod tracks;

pub use orchestrator::{FestivalRun, RunOptions, run};
pub use reconcile::{
    ApplyOutcome, BATCH_SIZE, ReconcileOptions, aggregate_tracks, apply, delete_old_playlists,
    plan,
};
pub use report::{ArtistOutcome, ArtistStatus, RunReport, print_apply_outcome};
pub use resolver::ArtistResolver;
pub use tracks::select_top_tracks;
