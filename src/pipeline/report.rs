use tabled::Table;

use crate::{
    info, success,
    types::{ArtistReportRow, Festival},
    warning,
};

use super::ApplyOutcome;

/// Per-artist outcome of the resolve/fetch states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistStatus {
    Resolved,
    Unresolved,
    FetchFailed,
}

impl ArtistStatus {
    fn label(&self) -> &'static str {
        match self {
            ArtistStatus::Resolved => "resolved",
            ArtistStatus::Unresolved => "unresolved",
            ArtistStatus::FetchFailed => "fetch failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtistOutcome {
    pub name: String,
    pub status: ArtistStatus,
    pub tracks_found: usize,
}

/// Collected outcomes of one festival run. Recoverable failures end up
/// here instead of aborting the run.
#[derive(Debug)]
pub struct RunReport {
    pub festival: Festival,
    pub year: i32,
    pub outcomes: Vec<ArtistOutcome>,
    pub target_track_count: usize,
}

impl RunReport {
    pub fn new(festival: Festival, year: i32) -> Self {
        Self {
            festival,
            year,
            outcomes: Vec::new(),
            target_track_count: 0,
        }
    }

    pub fn record(&mut self, name: &str, status: ArtistStatus, tracks_found: usize) {
        self.outcomes.push(ArtistOutcome {
            name: name.to_string(),
            status,
            tracks_found,
        });
    }

    pub fn resolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ArtistStatus::Resolved)
            .count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ArtistStatus::Unresolved)
            .count()
    }

    pub fn fetch_failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ArtistStatus::FetchFailed)
            .count()
    }

    /// Prints the per-artist table and a summary line.
    pub fn print(&self) {
        let rows: Vec<ArtistReportRow> = self
            .outcomes
            .iter()
            .map(|o| ArtistReportRow {
                artist: o.name.clone(),
                status: o.status.label().to_string(),
                tracks: o.tracks_found,
            })
            .collect();

        let table = Table::new(rows);
        println!(
            "Festival: {festival}\tYear: {year}\n{table}\n",
            festival = self.festival,
            year = self.year,
            table = table
        );

        info!(
            "{resolved} resolved, {unresolved} unresolved, {failed} fetch failures, {tracks} target tracks",
            resolved = self.resolved_count(),
            unresolved = self.unresolved_count(),
            failed = self.fetch_failed_count(),
            tracks = self.target_track_count
        );
    }
}

/// Prints what an apply pass actually changed on the remote playlist.
///
/// After a failed batch the skipped ids are listed explicitly so the
/// partially-updated playlist state stays auditable.
pub fn print_apply_outcome(outcome: &ApplyOutcome) {
    if outcome.is_clean() {
        success!(
            "Playlist updated: {} tracks added, {} removed",
            outcome.added.len(),
            outcome.removed.len()
        );
        return;
    }

    warning!(
        "Playlist partially updated: {} added, {} removed",
        outcome.added.len(),
        outcome.removed.len()
    );
    if let Some(e) = &outcome.failure {
        warning!("Mutation failure: {}", e);
    }
    if !outcome.skipped_remove.is_empty() {
        warning!(
            "Removals not applied: {}",
            outcome.skipped_remove.join(", ")
        );
    }
    if !outcome.skipped_add.is_empty() {
        warning!("Additions not applied: {}", outcome.skipped_add.join(", "));
    }
}
