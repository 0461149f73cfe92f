use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    catalog::Catalog,
    config,
    error::LineupError,
    export, info, lineup, success,
    types::{Festival, Lineup, Playlist, PlaylistRecord, Track},
    utils, warning,
};

use super::{
    ApplyOutcome, ArtistResolver, ArtistStatus, ReconcileOptions, RunReport, aggregate_tracks,
    apply, delete_old_playlists, plan, report::print_apply_outcome, select_top_tracks,
};

/// Options for one pipeline invocation, mapped from the CLI surface.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub festivals: Vec<Festival>,
    pub year: i32,
    pub top_n: usize,
    pub export: bool,
    pub generate_playlist: bool,
    pub delete_stale: bool,
    pub delete_old_playlists: bool,
    /// Overrides the lineup root directory. Lineups are read from
    /// `{root}/{festival}/{year}/` instead of the platform data dir.
    pub lineup_root: Option<PathBuf>,
}

/// Everything one festival produced: the lineup with resolved catalog ids,
/// the per-artist report, the computed playlist records, and the apply
/// outcome when a playlist was touched.
pub struct FestivalRun {
    pub lineup: Lineup,
    pub report: RunReport,
    pub records: Vec<PlaylistRecord>,
    pub target_track_ids: Vec<String>,
    pub apply_outcome: Option<ApplyOutcome>,
}

/// Runs the pipeline for every requested festival.
///
/// States per festival: LoadLineup → ResolveArtists → FetchTracks →
/// Aggregate → Reconcile → Report. A lineup that cannot be loaded is fatal
/// and aborts the whole run; resolution and fetch failures are per-artist
/// outcomes. The resolver cache spans all festivals of the run, so artists
/// appearing on several lineups are looked up once.
pub async fn run(
    catalog: &dyn Catalog,
    options: &RunOptions,
) -> Result<Vec<FestivalRun>, LineupError> {
    if options.delete_old_playlists && options.generate_playlist {
        match delete_old_playlists(catalog, config::PLAYLIST_PREFIX).await {
            Ok(removed) => info!("Removed {} old {} playlists.", removed, config::PLAYLIST_PREFIX),
            Err(e) => warning!("Failed to delete old playlists: {}", e),
        }
    }

    let mut resolver = ArtistResolver::new(catalog);
    let mut runs = Vec::new();

    for festival in &options.festivals {
        let festival = *festival;
        let run = run_festival(catalog, &mut resolver, festival, options).await?;
        runs.push(run);
    }

    Ok(runs)
}

async fn run_festival(
    catalog: &dyn Catalog,
    resolver: &mut ArtistResolver<'_>,
    festival: Festival,
    options: &RunOptions,
) -> Result<FestivalRun, LineupError> {
    // LoadLineup: the only fatal state.
    let dir = match &options.lineup_root {
        Some(root) => root.join(festival.key()).join(options.year.to_string()),
        None => config::lineup_dir(festival.key(), options.year),
    };
    let mut lineup = lineup::load_lineup_from(&dir, festival, options.year).await?;
    info!(
        "Loaded {} artists for {} {}",
        lineup.artists.len(),
        festival,
        options.year
    );

    let mut report = RunReport::new(festival, options.year);
    let mut per_artist: Vec<(String, Vec<Track>)> = Vec::new();

    let pb = ProgressBar::new(lineup.artists.len() as u64);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    // ResolveArtists + FetchTracks, one artist at a time in lineup order.
    for artist in &mut lineup.artists {
        pb.set_message(artist.name.clone());

        artist.catalog_id = resolver.resolve(&artist.name).await;
        match artist.catalog_id.clone() {
            None => report.record(&artist.name, ArtistStatus::Unresolved, 0),
            Some(id) => match select_top_tracks(catalog, &id, options.top_n).await {
                Ok(tracks) => {
                    report.record(&artist.name, ArtistStatus::Resolved, tracks.len());
                    per_artist.push((artist.name.clone(), tracks));
                }
                Err(_) => report.record(&artist.name, ArtistStatus::FetchFailed, 0),
            },
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    // Aggregate: lineup order, first occurrence wins.
    let (target_track_ids, records) = aggregate_tracks(&per_artist);
    report.target_track_count = target_track_ids.len();

    if options.export {
        match export::export_playlist_records(festival, options.year, &lineup, &records).await {
            Ok(dir) => success!("Exported lineup and playlist data to {}", dir.display()),
            Err(e) => warning!("Export failed: {}", e),
        }
    }

    let apply_outcome = if options.generate_playlist {
        reconcile_playlist(catalog, festival, options, &target_track_ids).await
    } else {
        None
    };

    report.print();
    if let Some(outcome) = &apply_outcome {
        print_apply_outcome(outcome);
    }

    Ok(FestivalRun {
        lineup,
        report,
        records,
        target_track_ids,
        apply_outcome,
    })
}

/// Reconcile state: converge the remote playlist to the target track set.
///
/// Catalog failures here are recoverable for the run as a whole; they are
/// reported and leave the playlist untouched (or partially updated, which
/// the apply outcome makes explicit).
async fn reconcile_playlist(
    catalog: &dyn Catalog,
    festival: Festival,
    options: &RunOptions,
    target_track_ids: &[String],
) -> Option<ApplyOutcome> {
    let name = utils::playlist_name(festival, options.year);

    // Duplicate avoidance: reuse a playlist with the target name.
    let existing = match catalog.find_playlists_by_name(&name).await {
        Ok(playlists) => match playlists.into_iter().next() {
            Some(found) => {
                let id = found.remote_id.clone()?;
                let track_ids = match catalog.playlist_track_ids(&id).await {
                    Ok(ids) => ids,
                    Err(e) => {
                        warning!("Failed to read playlist '{}': {}", name, e);
                        return None;
                    }
                };
                info!("Found existing playlist '{}'", name);
                Some(Playlist {
                    remote_id: Some(id),
                    name: name.clone(),
                    track_ids,
                })
            }
            None => None,
        },
        Err(e) => {
            warning!("Failed to look up playlist '{}': {}", name, e);
            return None;
        }
    };

    let reconcile_options = ReconcileOptions {
        delete_stale: options.delete_stale,
    };
    let reconciliation = plan(existing.as_ref(), target_track_ids, &reconcile_options);

    // An absent playlist is still created, even with nothing to add.
    let playlist_id = match existing.and_then(|p| p.remote_id) {
        Some(id) => {
            if reconciliation.is_empty() {
                success!("Playlist '{}' is already up to date.", name);
                return Some(ApplyOutcome::default());
            }
            id
        }
        None => {
            let description = format!("Top tracks for {} {}", festival, options.year);
            match catalog.create_playlist(&name, &description).await {
                Ok(created) => {
                    success!("Created playlist '{}'", name);
                    created.remote_id?
                }
                Err(e) => {
                    warning!("Failed to create playlist '{}': {}", name, e);
                    return None;
                }
            }
        }
    };

    Some(apply(catalog, &playlist_id, reconciliation).await)
}
