use std::collections::HashMap;

use crate::catalog::Catalog;

/// Resolves raw artist display names to catalog ids.
///
/// Owns the per-run resolution cache: the same name (case-insensitive) is
/// looked up against the catalog exactly once per run, even across
/// festivals. Unresolved lookups are cached too, so a name that failed once
/// is not retried within the run.
pub struct ArtistResolver<'a> {
    catalog: &'a dyn Catalog,
    cache: HashMap<String, Option<String>>,
}

impl<'a> ArtistResolver<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
        }
    }

    /// Resolves one artist name to a catalog id.
    ///
    /// Candidate selection prefers an exact case-insensitive name match;
    /// without one, the first candidate wins since the catalog returns
    /// results in relevance order. Zero candidates or a failed search (after
    /// the client's retries) yield `None`, a recoverable per-artist outcome.
    pub async fn resolve(&mut self, name: &str) -> Option<String> {
        let key = name.trim().to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let resolved = match self.catalog.search_artist(name.trim()).await {
            Ok(candidates) => {
                let exact = candidates
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(name.trim()));
                match exact {
                    Some(candidate) => Some(candidate.id.clone()),
                    None => candidates.first().map(|c| c.id.clone()),
                }
            }
            Err(_) => None,
        };

        self.cache.insert(key, resolved.clone());
        resolved
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}
