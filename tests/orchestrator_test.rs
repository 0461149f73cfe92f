use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use festify::catalog::Catalog;
use festify::error::{CatalogError, LineupError};
use festify::pipeline::{self, RunOptions};
use festify::types::{ArtistCandidate, Festival, Playlist, Track};

/// Catalog fake for full pipeline runs. Serves canned artists/tracks and
/// records playlist mutations.
#[derive(Default)]
struct MockCatalog {
    artists: HashMap<String, Vec<ArtistCandidate>>,
    tracks: HashMap<String, Vec<Track>>,
    created: Mutex<Vec<String>>,
    add_calls: Mutex<Vec<Vec<String>>>,
}

impl MockCatalog {
    fn with_artist(mut self, name: &str, artist_id: &str, track_count: usize) -> Self {
        self.artists.insert(
            name.to_string(),
            vec![ArtistCandidate {
                id: artist_id.to_string(),
                name: name.to_string(),
            }],
        );
        let tracks = (0..track_count)
            .map(|rank| Track {
                id: format!("{}-t{}", artist_id, rank),
                title: format!("Track {}", rank),
                artist_id: artist_id.to_string(),
                rank,
            })
            .collect();
        self.tracks.insert(artist_id.to_string(), tracks);
        self
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistCandidate>, CatalogError> {
        Ok(self.artists.get(name).cloned().unwrap_or_default())
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>, CatalogError> {
        Ok(self.tracks.get(artist_id).cloned().unwrap_or_default())
    }

    async fn find_playlists_by_name(&self, _name: &str) -> Result<Vec<Playlist>, CatalogError> {
        Ok(Vec::new())
    }

    async fn find_playlists_by_prefix(&self, _prefix: &str) -> Result<Vec<Playlist>, CatalogError> {
        Ok(Vec::new())
    }

    async fn playlist_track_ids(&self, _playlist_id: &str) -> Result<Vec<String>, CatalogError> {
        Ok(Vec::new())
    }

    async fn create_playlist(
        &self,
        name: &str,
        _description: &str,
    ) -> Result<Playlist, CatalogError> {
        self.created.lock().unwrap().push(name.to_string());
        Ok(Playlist {
            remote_id: Some(format!("created-{}", name)),
            name: name.to_string(),
            track_ids: Vec::new(),
        })
    }

    async fn add_tracks(
        &self,
        _playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), CatalogError> {
        self.add_calls.lock().unwrap().push(track_ids.to_vec());
        Ok(())
    }

    async fn remove_tracks(
        &self,
        _playlist_id: &str,
        _track_ids: &[String],
    ) -> Result<(), CatalogError> {
        Ok(())
    }

    async fn delete_playlist(&self, _playlist_id: &str) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// Creates an isolated lineup root with one CSV lineup for Wacken 2026.
fn lineup_root(tag: &str, artists: &[&str]) -> PathBuf {
    let root = std::env::temp_dir().join(format!("festify-{}-{}", tag, std::process::id()));
    let dir = root.join("wacken").join("2026");
    std::fs::create_dir_all(&dir).unwrap();

    let mut csv = String::from("artist\n");
    for artist in artists {
        csv.push_str(artist);
        csv.push('\n');
    }
    std::fs::write(dir.join("wacken_2026.csv"), csv).unwrap();
    root
}

fn options(root: PathBuf) -> RunOptions {
    RunOptions {
        festivals: vec![Festival::Wacken],
        year: 2026,
        top_n: 5,
        export: false,
        generate_playlist: false,
        delete_stale: false,
        delete_old_playlists: false,
        lineup_root: Some(root),
    }
}

#[tokio::test]
async fn test_run_keeps_unresolved_artists_in_report_and_succeeds() {
    let root = lineup_root("unresolved", &["Bloodbath", "Totally Unknown Act"]);
    let catalog = MockCatalog::default().with_artist("Bloodbath", "a1", 3);

    let runs = pipeline::run(&catalog, &options(root.clone())).await.unwrap();

    assert_eq!(runs.len(), 1);
    let run = &runs[0];
    assert_eq!(run.report.resolved_count(), 1);
    assert_eq!(run.report.unresolved_count(), 1);
    assert_eq!(run.report.outcomes.len(), 2);
    assert_eq!(run.target_track_ids.len(), 3);

    std::fs::remove_dir_all(root).unwrap();
}

#[tokio::test]
async fn test_run_fills_catalog_ids_on_the_lineup() {
    let root = lineup_root("catalog-ids", &["Bloodbath", "Totally Unknown Act"]);
    let catalog = MockCatalog::default().with_artist("Bloodbath", "a1", 2);

    let runs = pipeline::run(&catalog, &options(root.clone())).await.unwrap();

    let artists = &runs[0].lineup.artists;
    assert_eq!(artists[0].catalog_id.as_deref(), Some("a1"));
    assert_eq!(artists[1].catalog_id, None);

    std::fs::remove_dir_all(root).unwrap();
}

#[tokio::test]
async fn test_missing_lineup_aborts_the_run() {
    let root = std::env::temp_dir().join(format!("festify-missing-{}", std::process::id()));
    let catalog = MockCatalog::default();

    let result = pipeline::run(&catalog, &options(root)).await;

    assert!(matches!(result, Err(LineupError::NotFound(_))));
}

#[tokio::test]
async fn test_generate_creates_playlist_and_adds_target_tracks() {
    let root = lineup_root("generate", &["Bloodbath"]);
    let catalog = MockCatalog::default().with_artist("Bloodbath", "a1", 3);
    let mut opts = options(root.clone());
    opts.generate_playlist = true;

    let runs = pipeline::run(&catalog, &opts).await.unwrap();

    assert_eq!(
        catalog.created.lock().unwrap().as_slice(),
        ["Festify · wacken_2026".to_string()]
    );
    let added: usize = catalog.add_calls.lock().unwrap().iter().map(|c| c.len()).sum();
    assert_eq!(added, 3);
    assert!(runs[0].apply_outcome.as_ref().unwrap().is_clean());

    std::fs::remove_dir_all(root).unwrap();
}

#[tokio::test]
async fn test_generate_creates_playlist_even_with_empty_target() {
    let root = lineup_root("empty-target", &["Totally Unknown Act"]);
    let catalog = MockCatalog::default();
    let mut opts = options(root.clone());
    opts.generate_playlist = true;

    let runs = pipeline::run(&catalog, &opts).await.unwrap();

    // The playlist exists afterwards; nothing was added to it.
    assert_eq!(catalog.created.lock().unwrap().len(), 1);
    assert!(catalog.add_calls.lock().unwrap().is_empty());
    let outcome = runs[0].apply_outcome.as_ref().unwrap();
    assert!(outcome.is_clean());
    assert!(outcome.added.is_empty());

    std::fs::remove_dir_all(root).unwrap();
}
