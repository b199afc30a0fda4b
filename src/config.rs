//! Configuration management for artistdig.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::{CatalogError, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MARKET: &str = "JP";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up at `<data_local_dir>/artistdig/.env`:
/// - Linux: `~/.local/share/artistdig/.env`
/// - macOS: `~/Library/Application Support/artistdig/.env`
/// - Windows: `%LOCALAPPDATA%/artistdig/.env`
///
/// The directory is created when missing. A missing `.env` file is not an
/// error, since every setting can also come straight from the environment.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| CatalogError::Configuration(format!("{}: {e}", path.display())))?;
    }
    Ok(())
}

/// Returns `<data_local_dir>/artistdig`, or `./artistdig` when the platform
/// has no local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("artistdig");
    path
}

/// Returns the Spotify client ID used for the client-credentials exchange.
///
/// # Errors
///
/// Fails when `SPOTIFY_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify client secret used for the client-credentials exchange.
///
/// The secret only ever travels to the token endpoint; it is never attached
/// to catalog requests.
///
/// # Errors
///
/// Fails when `SPOTIFY_CLIENT_SECRET` is not set.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Base URL of the catalog API, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// URL of the OAuth token endpoint.
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Market code sent with top-track lookups.
pub fn spotify_market() -> String {
    optional("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string())
}

/// Optional token proxy endpoint. When set, bearer tokens are requested from
/// it instead of exchanging the client secret directly.
pub fn token_endpoint() -> Option<String> {
    optional("ARTISTDIG_TOKEN_ENDPOINT")
}

/// Timeout applied to every HTTP call, from `ARTISTDIG_HTTP_TIMEOUT_SECS`.
///
/// Unset or unparsable values fall back to 10 seconds.
pub fn http_timeout() -> Duration {
    let secs = optional("ARTISTDIG_HTTP_TIMEOUT_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Bind address for `artistdig serve`, e.g. `127.0.0.1:3000`.
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Location of the artist cache snapshot.
///
/// `ARTISTDIG_CACHE_PATH` when set, otherwise
/// `<data_local_dir>/artistdig/cache/artistCache.json`.
pub fn artist_cache_path() -> PathBuf {
    optional("ARTISTDIG_CACHE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("cache").join("artistCache.json"))
}

/// How bearer tokens are obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    ClientCredentials {
        token_url: String,
        client_id: String,
        client_secret: String,
    },
    Proxy {
        endpoint: String,
    },
}

/// Every setting gathered in one place.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub market: Option<String>,
    pub http_timeout: Duration,
    pub token_source: TokenSource,
    pub cache_path: PathBuf,
    pub server_addr: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let token_source = match token_endpoint() {
            Some(endpoint) => TokenSource::Proxy { endpoint },
            None => TokenSource::ClientCredentials {
                token_url: spotify_apitoken_url(),
                client_id: spotify_client_id()?,
                client_secret: spotify_client_secret()?,
            },
        };

        Ok(Self {
            api_url: spotify_apiurl(),
            market: Some(spotify_market()).filter(|m| !m.is_empty()),
            http_timeout: http_timeout(),
            token_source,
            cache_path: artist_cache_path(),
            server_addr: server_addr(),
        })
    }
}

fn required(key: &str) -> Result<String> {
    optional(key).ok_or_else(|| CatalogError::Configuration(format!("{key} must be set")))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
