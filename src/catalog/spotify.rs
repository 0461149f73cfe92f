use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config,
    error::CatalogError,
    management::TokenManager,
    types::{
        AddTracksRequest, ArtistCandidate, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse, Playlist, PlaylistItemsResponse,
        RemoveTracksRequest, SearchArtistsResponse, TopTracksResponse, Track, TrackUri,
    },
    utils, warning,
};

use super::Catalog;

/// Maximum retry attempts for a single API call.
const MAX_ATTEMPTS: u32 = 3;

/// Longest `Retry-After` delay honored before giving up on a rate-limited
/// call.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Page size for playlist listing and playlist item pagination.
const PAGE_LIMIT: usize = 50;

/// Spotify Web API implementation of the [`Catalog`] capability.
///
/// Holds a single HTTP client and the token manager behind a mutex so the
/// proactive token refresh stays serialized. All requests are bearer
/// authenticated; transient failures (network errors, 502, 429) are retried
/// with a linearly increasing delay before an error is returned to the
/// pipeline.
pub struct SpotifyCatalog {
    client: Client,
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyCatalog {
    /// Creates a catalog client from the persisted token cache.
    ///
    /// Fails with a hint towards the external OAuth helper when no token
    /// cache exists yet.
    pub async fn from_token_cache() -> Result<Self, String> {
        let token_mgr = TokenManager::load().await.map_err(|e| {
            format!(
                "Failed to load token cache. Authorize with your OAuth helper first. Err: {}",
                e
            )
        })?;

        Ok(Self {
            client: Client::new(),
            token_mgr: Mutex::new(token_mgr),
        })
    }

    async fn bearer(&self) -> String {
        self.token_mgr.lock().await.get_valid_token().await
    }

    /// Sends one API request with the retry policy applied.
    ///
    /// Retries up to [`MAX_ATTEMPTS`] times with a linearly increasing
    /// delay (1s, 2s) on network errors and 502 Bad Gateway. 429 responses
    /// honor the `Retry-After` header when it is within
    /// [`MAX_RETRY_AFTER_SECS`]; longer delays produce a warning and a
    /// [`CatalogError::RateLimited`].
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, CatalogError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let token = self.bearer().await;

            let mut request = self.client.request(method.clone(), url).bearer_auth(token);
            if let Some(json) = &body {
                request = request.json(json);
            }

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    if attempt < MAX_ATTEMPTS {
                        sleep(Duration::from_secs(attempt as u64)).await;
                        continue;
                    }
                    return Err(CatalogError::HttpError(err));
                }
            };

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);

                if retry_after <= MAX_RETRY_AFTER_SECS && attempt < MAX_ATTEMPTS {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue;
                }

                if retry_after > MAX_RETRY_AFTER_SECS {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
                        retry_after
                    );
                }
                return Err(CatalogError::RateLimited(retry_after));
            }

            match response.error_for_status() {
                Ok(valid_response) => return Ok(valid_response),
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY && attempt < MAX_ATTEMPTS {
                            sleep(Duration::from_secs(attempt as u64)).await;
                            continue; // retry
                        }
                    }
                    return Err(CatalogError::HttpError(err)); // propagate other errors
                }
            }
        }
    }

    /// Walks the user's playlist pages and collects every playlist whose
    /// name satisfies the filter.
    async fn collect_playlists(
        &self,
        matches: impl Fn(&str) -> bool + Send,
    ) -> Result<Vec<Playlist>, CatalogError> {
        let mut found = Vec::new();
        let mut offset = 0usize;

        loop {
            let url = format!(
                "{uri}/me/playlists?limit={limit}&offset={offset}",
                uri = &config::spotify_apiurl(),
                limit = PAGE_LIMIT,
                offset = offset
            );

            let response = self.send(Method::GET, &url, None).await?;
            let page = response.json::<GetUserPlaylistsResponse>().await?;
            let page_len = page.items.len();

            for pl in page.items {
                if matches(&pl.name) {
                    found.push(Playlist {
                        remote_id: Some(pl.id),
                        name: pl.name,
                        track_ids: Vec::new(),
                    });
                }
            }

            if page_len < PAGE_LIMIT {
                return Ok(found);
            }
            offset += PAGE_LIMIT;
        }
    }
}

#[async_trait]
impl Catalog for SpotifyCatalog {
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistCandidate>, CatalogError> {
        let url = format!(
            "{uri}/search?q={query}&type=artist&limit=10",
            uri = &config::spotify_apiurl(),
            query = utils::artist_search_query(name)
        );

        let response = self.send(Method::GET, &url, None).await?;
        let json = response.json::<SearchArtistsResponse>().await?;
        Ok(json.artists.items)
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>, CatalogError> {
        let url = format!(
            "{uri}/artists/{id}/top-tracks",
            uri = &config::spotify_apiurl(),
            id = artist_id
        );

        let response = self.send(Method::GET, &url, None).await?;
        let json = response.json::<TopTracksResponse>().await?;

        let tracks = json
            .tracks
            .into_iter()
            .enumerate()
            .map(|(rank, t)| Track {
                id: t.id,
                title: t.name,
                artist_id: artist_id.to_string(),
                rank,
            })
            .collect();

        Ok(tracks)
    }

    async fn find_playlists_by_name(&self, name: &str) -> Result<Vec<Playlist>, CatalogError> {
        let wanted = name.to_string();
        self.collect_playlists(move |n| n == wanted).await
    }

    async fn find_playlists_by_prefix(&self, prefix: &str) -> Result<Vec<Playlist>, CatalogError> {
        let wanted = prefix.to_string();
        self.collect_playlists(move |n| n.starts_with(&wanted)).await
    }

    async fn playlist_track_ids(&self, playlist_id: &str) -> Result<Vec<String>, CatalogError> {
        let mut track_ids = Vec::new();
        let mut offset = 0usize;

        loop {
            let url = format!(
                "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
                uri = &config::spotify_apiurl(),
                id = playlist_id,
                limit = PAGE_LIMIT,
                offset = offset
            );

            let response = self.send(Method::GET, &url, None).await?;
            let page = response.json::<PlaylistItemsResponse>().await?;
            let page_len = page.items.len();

            for item in page.items {
                if let Some(track) = item.track {
                    track_ids.push(track.id);
                }
            }

            if page_len < PAGE_LIMIT {
                return Ok(track_ids);
            }
            offset += PAGE_LIMIT;
        }
    }

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Playlist, CatalogError> {
        let url = format!(
            "{uri}/users/{user}/playlists",
            uri = &config::spotify_apiurl(),
            user = &config::spotify_user()
        );

        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: false,
            collaborative: false,
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;

        let response = self.send(Method::POST, &url, Some(body)).await?;
        let json = response.json::<CreatePlaylistResponse>().await?;

        Ok(Playlist {
            remote_id: Some(json.id),
            name: json.name,
            track_ids: Vec::new(),
        })
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), CatalogError> {
        if track_ids.is_empty() {
            return Ok(());
        }

        let url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = &config::spotify_apiurl(),
            id = playlist_id
        );

        let request = AddTracksRequest {
            uris: track_ids.iter().map(|id| utils::track_uri(id)).collect(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;

        self.send(Method::POST, &url, Some(body)).await?;
        Ok(())
    }

    async fn remove_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), CatalogError> {
        if track_ids.is_empty() {
            return Ok(());
        }

        let url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = &config::spotify_apiurl(),
            id = playlist_id
        );

        let request = RemoveTracksRequest {
            tracks: track_ids
                .iter()
                .map(|id| TrackUri {
                    uri: utils::track_uri(id),
                })
                .collect(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;

        self.send(Method::DELETE, &url, Some(body)).await?;
        Ok(())
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<(), CatalogError> {
        // Spotify deletes playlists by unfollowing them.
        let url = format!(
            "{uri}/playlists/{id}/followers",
            uri = &config::spotify_apiurl(),
            id = playlist_id
        );

        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }
}
