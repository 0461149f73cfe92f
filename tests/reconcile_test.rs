use festify::pipeline::{ReconcileOptions, aggregate_tracks, plan};
use festify::types::{Playlist, Track};

fn create_test_track(id: &str, title: &str, artist_id: &str, rank: usize) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist_id: artist_id.to_string(),
        rank,
    }
}

fn create_test_playlist(track_ids: &[&str]) -> Playlist {
    Playlist {
        remote_id: Some("pl1".to_string()),
        name: "Festify · wacken_2026".to_string(),
        track_ids: track_ids.iter().map(|s| s.to_string()).collect(),
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_aggregate_dedups_and_preserves_first_occurrence_order() {
    let per_artist = vec![
        (
            "Artist A".to_string(),
            vec![create_test_track("t1", "Song 1", "a1", 0)],
        ),
        (
            "Artist B".to_string(),
            vec![create_test_track("t2", "Song 2", "a2", 0)],
        ),
        (
            "Artist A2".to_string(),
            vec![create_test_track("t1", "Song 1", "a1", 0)],
        ),
    ];

    let (target, records) = aggregate_tracks(&per_artist);

    assert_eq!(target, ids(&["t1", "t2"]));
    assert_eq!(records.len(), 2);
    // First occurrence wins, including the owning artist
    assert_eq!(records[0].artist, "Artist A");
    assert_eq!(records[1].artist, "Artist B");
}

#[test]
fn test_aggregate_keeps_lineup_and_popularity_order() {
    let per_artist = vec![
        (
            "B".to_string(),
            vec![
                create_test_track("b1", "B One", "b", 0),
                create_test_track("b2", "B Two", "b", 1),
            ],
        ),
        (
            "A".to_string(),
            vec![create_test_track("a1", "A One", "a", 0)],
        ),
    ];

    let (target, _) = aggregate_tracks(&per_artist);

    // Lineup order, not alphabetical order
    assert_eq!(target, ids(&["b1", "b2", "a1"]));
}

#[test]
fn test_plan_without_existing_playlist_adds_everything() {
    let target = ids(&["t1", "t2", "t3"]);
    let result = plan(None, &target, &ReconcileOptions::default());

    assert_eq!(result.to_add, ids(&["t1", "t2", "t3"]));
    assert!(result.to_remove.is_empty());
}

#[test]
fn test_plan_without_existing_playlist_dedups_target() {
    let target = ids(&["t1", "t2", "t1"]);
    let result = plan(None, &target, &ReconcileOptions::default());

    assert_eq!(result.to_add, ids(&["t1", "t2"]));
}

#[test]
fn test_plan_additive_only_by_default() {
    let existing = create_test_playlist(&["t1", "t2"]);
    let target = ids(&["t2", "t3"]);

    let result = plan(Some(&existing), &target, &ReconcileOptions::default());

    assert_eq!(result.to_add, ids(&["t3"]));
    assert!(result.to_remove.is_empty());
}

#[test]
fn test_plan_removes_stale_tracks_when_enabled() {
    let existing = create_test_playlist(&["t1", "t2"]);
    let target = ids(&["t2", "t3"]);
    let options = ReconcileOptions { delete_stale: true };

    let result = plan(Some(&existing), &target, &options);

    assert_eq!(result.to_add, ids(&["t3"]));
    assert_eq!(result.to_remove, ids(&["t1"]));
}

#[test]
fn test_plan_add_and_remove_are_disjoint() {
    let existing = create_test_playlist(&["t1", "t2", "t3"]);
    let target = ids(&["t3", "t4", "t5"]);
    let options = ReconcileOptions { delete_stale: true };

    let result = plan(Some(&existing), &target, &options);

    for id in &result.to_add {
        assert!(!result.to_remove.contains(id));
    }
}

#[test]
fn test_plan_is_idempotent_after_convergence() {
    let existing = create_test_playlist(&["t1", "t2"]);
    let target = ids(&["t2", "t3"]);
    let options = ReconcileOptions { delete_stale: true };

    let first = plan(Some(&existing), &target, &options);

    // Simulate applying the plan: removals, then additions
    let mut converged: Vec<String> = existing
        .track_ids
        .iter()
        .filter(|id| !first.to_remove.contains(id))
        .cloned()
        .collect();
    converged.extend(first.to_add.clone());

    let converged_playlist = Playlist {
        remote_id: existing.remote_id.clone(),
        name: existing.name.clone(),
        track_ids: converged,
    };

    let second = plan(Some(&converged_playlist), &target, &options);
    assert!(second.is_empty());
}

#[test]
fn test_plan_preserves_target_order_for_additions() {
    let existing = create_test_playlist(&["x"]);
    let target = ids(&["t3", "t1", "t2"]);

    let result = plan(Some(&existing), &target, &ReconcileOptions::default());

    assert_eq!(result.to_add, ids(&["t3", "t1", "t2"]));
}
