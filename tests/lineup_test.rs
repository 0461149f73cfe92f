use festify::lineup::{find_lineup_path, parse_csv_lineup, parse_json_lineup};
use festify::types::Festival;
use festify::utils::{
    artist_search_query, dedup_track_ids, playlist_name, schema_name, slug, track_uri,
};

#[test]
fn test_parse_csv_lineup_with_artist_column() {
    let content = "artist,stage,day\nBloodbath,Main,Friday\nOpeth,Main,Saturday\n";
    let artists = parse_csv_lineup(content).unwrap();

    assert_eq!(artists, vec!["Bloodbath", "Opeth"]);
}

#[test]
fn test_parse_csv_lineup_preserves_source_order() {
    let content = "artist\nZeal & Ardor\nAmon Amarth\nBloodbath\n";
    let artists = parse_csv_lineup(content).unwrap();

    assert_eq!(artists, vec!["Zeal & Ardor", "Amon Amarth", "Bloodbath"]);
}

#[test]
fn test_parse_csv_lineup_handles_quoted_fields() {
    let content = "artist,origin\n\"Earth, Wind & Fire\",US\n\"The \"\"Band\"\"\",DE\n";
    let artists = parse_csv_lineup(content).unwrap();

    assert_eq!(artists, vec!["Earth, Wind & Fire", "The \"Band\""]);
}

#[test]
fn test_parse_csv_lineup_skips_empty_rows() {
    let content = "artist\nBloodbath\n\n  \nOpeth\n";
    let artists = parse_csv_lineup(content).unwrap();

    assert_eq!(artists, vec!["Bloodbath", "Opeth"]);
}

#[test]
fn test_parse_csv_lineup_requires_artist_header() {
    let content = "band,stage\nBloodbath,Main\n";
    assert!(parse_csv_lineup(content).is_err());
}

#[test]
fn test_parse_json_lineup_accepts_string_list() {
    let content = r#"["Bloodbath", "Opeth"]"#;
    let artists = parse_json_lineup(content).unwrap();

    assert_eq!(artists, vec!["Bloodbath", "Opeth"]);
}

#[test]
fn test_parse_json_lineup_accepts_object_list() {
    let content = r#"[{"artist": "Bloodbath"}, {"artist": "Opeth"}]"#;
    let artists = parse_json_lineup(content).unwrap();

    assert_eq!(artists, vec!["Bloodbath", "Opeth"]);
}

#[test]
fn test_parse_json_lineup_rejects_non_list_root() {
    let content = r#"{"artist": "Bloodbath"}"#;
    assert!(parse_json_lineup(content).is_err());
}

#[test]
fn test_schema_name_formats_festival_and_year() {
    assert_eq!(schema_name(Festival::Wacken, 2026), "wacken_2026");
    assert_eq!(
        schema_name(Festival::MetalInSachsen, 2026),
        "metal_in_sachsen_2026"
    );
}

#[test]
fn test_playlist_name_carries_prefix() {
    assert_eq!(
        playlist_name(Festival::Partysan, 2026),
        "Festify · partysan_2026"
    );
}

#[test]
fn test_slug_normalizes_text() {
    assert_eq!(slug("Party.San Open Air"), "party_san_open_air");
    assert_eq!(slug("  Wacken  "), "wacken");
    assert_eq!(slug("!!!"), "unknown");
}

#[test]
fn test_slug_turns_playlist_name_into_file_stem() {
    let stem = slug(&playlist_name(Festival::Partysan, 2026));
    assert_eq!(stem, "festify_partysan_2026");
}

#[test]
fn test_dedup_track_ids_keeps_first_occurrence() {
    let mut ids = vec![
        "t1".to_string(),
        "t2".to_string(),
        "t1".to_string(),
        "t3".to_string(),
    ];
    dedup_track_ids(&mut ids);

    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[test]
fn test_track_uri_format() {
    assert_eq!(track_uri("abc123"), "spotify:track:abc123");
}

#[test]
fn test_artist_search_query_is_percent_encoded() {
    assert_eq!(
        artist_search_query("Zeal & Ardor"),
        "artist%3AZeal%20%26%20Ardor"
    );
    assert_eq!(artist_search_query("Opeth"), "artist%3AOpeth");
}

#[tokio::test]
async fn test_find_lineup_path_prefers_schema_named_csv() {
    let dir = std::env::temp_dir().join(format!("festify-lookup-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("aaa_other.csv"), "artist\n").unwrap();
    std::fs::write(dir.join("wacken_2026.csv"), "artist\n").unwrap();

    let found = find_lineup_path(&dir, Festival::Wacken, 2026).await.unwrap();
    assert_eq!(found, dir.join("wacken_2026.csv"));

    // Without the schema-named file, fall back to the first candidate.
    std::fs::remove_file(dir.join("wacken_2026.csv")).unwrap();
    let found = find_lineup_path(&dir, Festival::Wacken, 2026).await.unwrap();
    assert_eq!(found, dir.join("aaa_other.csv"));

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_find_lineup_path_reports_missing_directory() {
    let dir = std::env::temp_dir().join(format!("festify-absent-{}", std::process::id()));
    assert!(find_lineup_path(&dir, Festival::Wacken, 2026).await.is_err());
}
