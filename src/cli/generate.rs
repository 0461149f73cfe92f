use crate::{catalog::spotify::SpotifyCatalog, error, pipeline, success};

/// Runs the full pipeline for the requested festivals.
///
/// Connects the Spotify catalog from the persisted token cache, runs the
/// orchestrator, and exits non-zero on fatal errors (missing token cache,
/// missing or malformed lineup). Per-artist failures are reported by the
/// pipeline and do not change the exit code.
pub async fn generate(options: pipeline::RunOptions) {
    let catalog = match SpotifyCatalog::from_token_cache().await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{}", e);
        }
    };

    match pipeline::run(&catalog, &options).await {
        Ok(runs) => {
            let total_tracks: usize = runs.iter().map(|r| r.target_track_ids.len()).sum();
            success!(
                "Done. {} festival(s) processed, {} target tracks computed.",
                runs.len(),
                total_tracks
            );
        }
        Err(e) => {
            error!("{}", e);
        }
    }
}
