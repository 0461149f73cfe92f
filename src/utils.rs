use std::collections::HashSet;

use crate::{config, types::Festival};

pub fn schema_name(festival: Festival, year: i32) -> String {
    format!("{}_{}", festival.key(), year)
}

pub fn playlist_name(festival: Festival, year: i32) -> String {
    format!("{} · {}", config::PLAYLIST_PREFIX, schema_name(festival, year))
}

pub fn slug(text: &str) -> String {
    let mut s = String::new();
    let mut last_was_sep = true;
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            s.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            s.push('_');
            last_was_sep = true;
        }
    }
    let s = s.trim_end_matches('_').to_string();
    if s.is_empty() { "unknown".to_string() } else { s }
}

pub fn dedup_track_ids(track_ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    track_ids.retain(|id| seen.insert(id.clone()));
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

pub fn artist_search_query(name: &str) -> String {
    urlencoding::encode(&format!("artist:{}", name)).into_owned()
}

pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
