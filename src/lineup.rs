//! Festival lineup discovery and parsing.
//!
//! Lineups live as CSV or JSON files under
//! `<data_dir>/lineups/{festival}/{year}/`. The festival tag selects the
//! expected file name; parsing is shared across festivals. A missing or
//! malformed lineup is fatal for the run.

use std::path::{Path, PathBuf};

use crate::{
    config,
    error::LineupError,
    types::{Artist, Festival, Lineup},
    utils,
};

/// Loads the lineup for a festival/year from the local data directory.
pub async fn load_lineup(festival: Festival, year: i32) -> Result<Lineup, LineupError> {
    let dir = config::lineup_dir(festival.key(), year);
    load_lineup_from(&dir, festival, year).await
}

/// Loads the lineup for a festival/year from a specific directory.
///
/// Looks for `{festival}_{year}.csv` first, then `.json`, then any
/// `.csv`/`.json` file in the directory. Source order of the artists is
/// preserved.
pub async fn load_lineup_from(
    dir: &Path,
    festival: Festival,
    year: i32,
) -> Result<Lineup, LineupError> {
    let path = find_lineup_path(dir, festival, year).await?;
    let content = async_fs::read_to_string(&path).await?;

    let names = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_lineup(&content)?,
        _ => parse_csv_lineup(&content)?,
    };

    Ok(Lineup {
        festival,
        year,
        artists: names.into_iter().map(Artist::new).collect(),
    })
}

/// Locates the lineup file for a festival/year.
///
/// Prefers the schema-named file, falls back to the first CSV or JSON file
/// found in the lineup directory.
pub async fn find_lineup_path(
    dir: &Path,
    festival: Festival,
    year: i32,
) -> Result<PathBuf, LineupError> {
    let schema = utils::schema_name(festival, year);

    for ext in ["csv", "json"] {
        let candidate = dir.join(format!("{}.{}", schema, ext));
        if is_file(&candidate).await {
            return Ok(candidate);
        }
    }

    if let Ok(mut read_dir) = tokio::fs::read_dir(dir).await {
        let mut entries = Vec::new();
        while let Ok(Some(entry)) = read_dir.next_entry().await {
            let path = entry.path();
            if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("csv") | Some("json")
            ) {
                entries.push(path);
            }
        }
        entries.sort();
        if let Some(found) = entries.into_iter().next() {
            return Ok(found);
        }
    }

    Err(LineupError::NotFound(dir.join(format!("{}.csv", schema))))
}

async fn is_file(path: &Path) -> bool {
    async_fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Parses artist names from CSV content with an `artist` column header.
pub fn parse_csv_lineup(content: &str) -> Result<Vec<String>, LineupError> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| LineupError::ParseError("empty lineup file".to_string()))?;

    let columns = split_csv_line(header);
    let artist_col = columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case("artist"))
        .ok_or_else(|| {
            LineupError::ParseError("CSV must contain an 'artist' column header".to_string())
        })?;

    let mut artists = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if let Some(name) = fields.get(artist_col) {
            let name = name.trim();
            if !name.is_empty() {
                artists.push(name.to_string());
            }
        }
    }

    Ok(artists)
}

/// Parses artist names from JSON content.
///
/// Accepts either `[{"artist": "Name"}, ...]` or `["Name", ...]`.
pub fn parse_json_lineup(content: &str) -> Result<Vec<String>, LineupError> {
    let data: serde_json::Value = serde_json::from_str(content)?;

    let entries = data
        .as_array()
        .ok_or_else(|| LineupError::ParseError("JSON lineup must be a list".to_string()))?;

    let mut artists = Vec::new();
    for entry in entries {
        let name = match entry {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Object(map) => map.get("artist").and_then(|v| v.as_str()),
            _ => None,
        };

        match name {
            Some(n) if !n.trim().is_empty() => artists.push(n.trim().to_string()),
            Some(_) => {}
            None => {
                return Err(LineupError::ParseError(
                    "JSON lineup entries must be strings or objects with an 'artist' key"
                        .to_string(),
                ));
            }
        }
    }

    Ok(artists)
}

/// Writes a lineup back to its schema-named CSV file (used by `--export`).
pub async fn write_lineup_csv(path: &Path, names: &[String]) -> Result<(), LineupError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let mut out = String::from("artist\n");
    for name in names {
        out.push_str(&utils::csv_field(name));
        out.push('\n');
    }

    async_fs::write(path, out).await?;
    Ok(())
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}
