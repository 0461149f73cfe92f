//! Configuration management for the Festival Playlist Generator.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API endpoints,
//! credentials, and playlist defaults.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Number of top tracks taken per artist when `--top-n` is not given.
pub const DEFAULT_TOP_N: usize = 5;

/// Prefix shared by all generated playlists. Spotify has no playlist
/// folders, so grouping is simulated by the common name prefix.
pub const PLAYLIST_PREFIX: &str = "Festify";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `festify/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/festify/.env`
/// - macOS: `~/Library/Application Support/festify/.env`
/// - Windows: `%LOCALAPPDATA%/festify/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded, or an error
/// string if directory creation or file loading fails.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
///
/// # Example
///
/// ```
/// use festify::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the application's directory in the platform local data dir.
///
/// All caches, lineups, and exports live under this directory:
/// - Linux: `~/.local/share/festify`
/// - macOS: `~/Library/Application Support/festify`
/// - Windows: `%LOCALAPPDATA%/festify`
///
/// Falls back to the current directory when the platform directory cannot
/// be determined.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("festify");
    path
}

/// Returns the directory where lineup files for a festival/year are expected.
///
/// Lineups are discovered as `{festival}_{year}.csv` or `.json` inside
/// `<data_dir>/lineups/{festival}/{year}/`.
pub fn lineup_dir(festival: &str, year: i32) -> PathBuf {
    let mut path = data_dir();
    path.push("lineups");
    path.push(festival);
    path.push(year.to_string());
    path
}

/// Returns the directory where exports for a festival/year are written.
pub fn export_dir(festival: &str, year: i32) -> PathBuf {
    let mut path = data_dir();
    path.push("exports");
    path.push(festival);
    path.push(year.to_string());
    path
}

/// Returns the Spotify user ID for API operations.
///
/// Retrieves the `SPOTIFY_USER_ID` environment variable which identifies
/// the Spotify user account for playlist creation and other user-specific
/// operations.
///
/// # Panics
///
/// Panics if the `SPOTIFY_USER_ID` environment variable is not set.
///
/// # Example
///
/// ```
/// let user_id = spotify_user(); // e.g., "username"
/// ```
pub fn spotify_user() -> String {
    env::var("SPOTIFY_USER_ID").expect("SPOTIFY_USER_ID must be set")
}

/// Returns the Spotify API client ID for token refresh.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
///
/// # Example
///
/// ```
/// let client_id = spotify_client_id(); // e.g., "abc123..."
/// ```
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. This is used for all API
/// operations after authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL used for refreshing access tokens with the stored refresh token.
/// Obtaining the initial token is handled by an external OAuth helper; this
/// application only refreshes it.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // e.g., "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}
