//! Export writers for already-computed data.
//!
//! Writes the normalized lineup and the computed playlist records as CSV
//! and JSON under `<data_dir>/exports/{festival}/{year}/`. Formats mirror
//! the lineup input files so exports can be re-used as lineup sources.

use std::path::PathBuf;

use crate::{
    Res, config, lineup,
    types::{Festival, Lineup, PlaylistRecord},
    utils,
};

/// Writes lineup and playlist exports for one festival run.
///
/// Produces three files in the export directory:
/// - `{festival}_{year}.csv` — the normalized lineup
/// - `festify_{festival}_{year}.csv` — artist/track id/title records
/// - `festify_{festival}_{year}.json` — the same records as JSON
///
/// Record file names are the slug of the playlist name, so they stay
/// filesystem-safe whatever the playlist prefix contains. Returns the
/// export directory on success.
pub async fn export_playlist_records(
    festival: Festival,
    year: i32,
    lineup: &Lineup,
    records: &[PlaylistRecord],
) -> Res<PathBuf> {
    let dir = config::export_dir(festival.key(), year);
    async_fs::create_dir_all(&dir).await?;

    let schema = utils::schema_name(festival, year);

    let names: Vec<String> = lineup.artists.iter().map(|a| a.name.clone()).collect();
    let lineup_path = dir.join(format!("{}.csv", schema));
    lineup::write_lineup_csv(&lineup_path, &names).await?;

    let record_base = utils::slug(&utils::playlist_name(festival, year));
    let csv_path = dir.join(format!("{}.csv", record_base));
    async_fs::write(&csv_path, records_to_csv(records)).await?;

    let json_path = dir.join(format!("{}.json", record_base));
    let json = serde_json::to_string_pretty(records)?;
    async_fs::write(&json_path, json).await?;

    Ok(dir)
}

fn records_to_csv(records: &[PlaylistRecord]) -> String {
    let mut out = String::from("artist,track_id,title\n");
    for record in records {
        out.push_str(&format!(
            "{},{},{}\n",
            utils::csv_field(&record.artist),
            utils::csv_field(&record.track_id),
            utils::csv_field(&record.title)
        ));
    }
    out
}
