use std::collections::HashSet;

use crate::{
    catalog::Catalog,
    error::CatalogError,
    types::{Playlist, PlaylistRecord, ReconciliationPlan, Track},
    utils,
};

/// Batch-size limit of the catalog's playlist mutation calls.
pub const BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Remove tracks that are in the playlist but not in the target set.
    /// Off by default; additive-only is the safe mode.
    pub delete_stale: bool,
}

/// Result of one apply pass. Lists exactly which track ids were applied and
/// which were skipped after a failed batch, so partial state stays
/// auditable. There is no rollback.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub skipped_add: Vec<String>,
    pub skipped_remove: Vec<String>,
    pub failure: Option<CatalogError>,
}

impl ApplyOutcome {
    pub fn is_clean(&self) -> bool {
        self.failure.is_none()
    }
}

/// Flattens per-artist track lists into the target track-id sequence.
///
/// Artists stay in lineup order, tracks in per-artist popularity order;
/// duplicates are dropped keeping the first occurrence. The returned
/// records mirror the target ids one to one and feed the export writer.
pub fn aggregate_tracks(per_artist: &[(String, Vec<Track>)]) -> (Vec<String>, Vec<PlaylistRecord>) {
    let mut seen = HashSet::new();
    let mut target = Vec::new();
    let mut records = Vec::new();

    for (artist_name, tracks) in per_artist {
        for track in tracks {
            if seen.insert(track.id.clone()) {
                target.push(track.id.clone());
                records.push(PlaylistRecord {
                    artist: artist_name.clone(),
                    track_id: track.id.clone(),
                    title: track.title.clone(),
                });
            }
        }
    }

    (target, records)
}

/// Computes the minimal additions/removals that converge a playlist to the
/// target track list.
///
/// With no existing playlist the whole (deduplicated) target is added.
/// Against an existing playlist, only tracks missing from it are added, in
/// target order; stale tracks are removed only when
/// [`ReconcileOptions::delete_stale`] is set. Applying the resulting plan
/// and planning again yields an empty plan.
pub fn plan(
    existing: Option<&Playlist>,
    target: &[String],
    options: &ReconcileOptions,
) -> ReconciliationPlan {
    let mut deduped = target.to_vec();
    utils::dedup_track_ids(&mut deduped);

    match existing {
        None => ReconciliationPlan {
            to_add: deduped,
            to_remove: Vec::new(),
        },
        Some(playlist) => {
            let current: HashSet<&String> = playlist.track_ids.iter().collect();
            let wanted: HashSet<&String> = deduped.iter().collect();

            let to_add = deduped
                .iter()
                .filter(|id| !current.contains(*id))
                .cloned()
                .collect();

            let to_remove = if options.delete_stale {
                let mut stale_seen = HashSet::new();
                playlist
                    .track_ids
                    .iter()
                    .filter(|id| !wanted.contains(*id))
                    .filter(|id| stale_seen.insert((*id).clone()))
                    .cloned()
                    .collect()
            } else {
                Vec::new()
            };

            ReconciliationPlan { to_add, to_remove }
        }
    }
}

/// Applies a reconciliation plan to a remote playlist.
///
/// Removals run fully before additions so a re-ordered track never shows up
/// twice while the update is in flight. Each phase issues sequential
/// batches of at most [`BATCH_SIZE`] ids. The two phases are not atomic: a
/// batch that fails after the client's retries aborts the remaining batches
/// of that phase only, and already-applied batches stay applied.
pub async fn apply(
    catalog: &dyn Catalog,
    playlist_id: &str,
    plan: ReconciliationPlan,
) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    let mut remove_batches = plan.to_remove.chunks(BATCH_SIZE);
    while let Some(batch) = remove_batches.next() {
        match catalog.remove_tracks(playlist_id, batch).await {
            Ok(()) => outcome.removed.extend_from_slice(batch),
            Err(e) => {
                outcome.skipped_remove.extend_from_slice(batch);
                for rest in remove_batches {
                    outcome.skipped_remove.extend_from_slice(rest);
                }
                outcome.failure = Some(e);
                break;
            }
        }
    }

    let mut add_batches = plan.to_add.chunks(BATCH_SIZE);
    while let Some(batch) = add_batches.next() {
        match catalog.add_tracks(playlist_id, batch).await {
            Ok(()) => outcome.added.extend_from_slice(batch),
            Err(e) => {
                outcome.skipped_add.extend_from_slice(batch);
                for rest in add_batches {
                    outcome.skipped_add.extend_from_slice(rest);
                }
                outcome.failure = Some(e);
                break;
            }
        }
    }

    outcome
}

/// Deletes all prior playlists whose name starts with `prefix`.
///
/// Used by `--delete-old-playlists` before a rebuild. Returns the number of
/// deleted playlists.
pub async fn delete_old_playlists(
    catalog: &dyn Catalog,
    prefix: &str,
) -> Result<usize, CatalogError> {
    let playlists = catalog.find_playlists_by_prefix(prefix).await?;
    let mut removed = 0;

    for playlist in playlists {
        if let Some(id) = playlist.remote_id {
            catalog.delete_playlist(&id).await?;
            removed += 1;
        }
    }

    Ok(removed)
}
