use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::{Settings, TokenSource},
    error::{CatalogError, Result},
    spotify::{
        auth::{ClientCredentialsIssuer, TokenIssuer, TokenProxyIssuer, TokenStore},
        fetcher::{AuthenticatedFetcher, RequestOptions},
    },
    types::{ArtistSummary, TopTracksResponse, Track},
};

/// Typed read operations against the music catalog.
///
/// Every failure is wrapped in the operation-specific variant
/// ([`CatalogError::Search`], [`CatalogError::ArtistDetails`],
/// [`CatalogError::TopTracks`]) with the underlying cause kept as its source.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Searches artists by free text. `limit` is passed through as the
    /// upstream page size when given.
    async fn search_artists(&self, query: &str, limit: Option<u32>) -> Result<Vec<ArtistSummary>>;

    async fn get_artist(&self, artist_id: &str) -> Result<ArtistSummary>;

    async fn get_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>>;
}

/// [`Catalog`] implementation over the Spotify Web API.
///
/// # API Endpoints
///
/// - `GET /search?q=<query>&type=artist[&limit=N]`
/// - `GET /artists/{id}`
/// - `GET /artists/{id}/top-tracks[?market=XX]`
///
/// All calls go through [`AuthenticatedFetcher`], so a rejected token is
/// refreshed and the call retried once transparently.
///
/// # Example
///
/// ```
/// let settings = config::Settings::from_env()?;
/// let catalog = CatalogClient::from_settings(&settings)?;
/// let artists = catalog.search_artists("Radiohead", None).await?;
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    fetcher: AuthenticatedFetcher,
    api_url: String,
    market: Option<String>,
}

impl CatalogClient {
    pub fn new(fetcher: AuthenticatedFetcher, api_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            market: None,
        }
    }

    pub fn with_market(mut self, market: Option<String>) -> Self {
        self.market = market;
        self
    }

    /// Wires the whole request stack (HTTP client with timeout, token issuer,
    /// token store, fetcher) from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder().timeout(settings.http_timeout).build()?;

        let issuer: Arc<dyn TokenIssuer> = match &settings.token_source {
            TokenSource::ClientCredentials {
                token_url,
                client_id,
                client_secret,
            } => Arc::new(ClientCredentialsIssuer::new(
                client.clone(),
                token_url.clone(),
                client_id.clone(),
                client_secret.clone(),
            )),
            TokenSource::Proxy { endpoint } => {
                Arc::new(TokenProxyIssuer::new(client.clone(), endpoint.clone()))
            }
        };

        let tokens = Arc::new(TokenStore::new(issuer));
        let fetcher = AuthenticatedFetcher::new(client, tokens);
        Ok(Self::new(fetcher, settings.api_url.clone()).with_market(settings.market.clone()))
    }

    async fn fetch_json(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        let response = self.fetcher.request_with_auth(url, options).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::ContractViolation(format!("response body is not JSON: {e}")))
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search_artists(&self, query: &str, limit: Option<u32>) -> Result<Vec<ArtistSummary>> {
        let wrap = |source: CatalogError| CatalogError::Search {
            query: query.to_string(),
            source: Box::new(source),
        };

        let mut options = RequestOptions::get().query("q", query).query("type", "artist");
        if let Some(limit) = limit {
            options = options.query("limit", limit.to_string());
        }

        let url = format!("{}/search", self.api_url);
        let body = self.fetch_json(&url, &options).await.map_err(wrap)?;

        // an absent list is a broken contract, not "no matches"
        let items = body
            .get("artists")
            .and_then(|artists| artists.get("items"))
            .filter(|items| items.is_array())
            .cloned()
            .ok_or_else(|| {
                wrap(CatalogError::ContractViolation(
                    "search response has no artists.items list".to_string(),
                ))
            })?;

        serde_json::from_value::<Vec<ArtistSummary>>(items)
            .map_err(|e| wrap(CatalogError::ContractViolation(format!("malformed artist item: {e}"))))
    }

    async fn get_artist(&self, artist_id: &str) -> Result<ArtistSummary> {
        let wrap = |source: CatalogError| CatalogError::ArtistDetails {
            artist_id: artist_id.to_string(),
            source: Box::new(source),
        };

        let url = format!("{}/artists/{}", self.api_url, artist_id);
        let body = self
            .fetch_json(&url, &RequestOptions::get())
            .await
            .map_err(wrap)?;

        serde_json::from_value::<ArtistSummary>(body)
            .map_err(|e| wrap(CatalogError::ContractViolation(format!("malformed artist: {e}"))))
    }

    async fn get_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        let wrap = |source: CatalogError| CatalogError::TopTracks {
            artist_id: artist_id.to_string(),
            source: Box::new(source),
        };

        let mut options = RequestOptions::get();
        if let Some(market) = &self.market {
            options = options.query("market", market.clone());
        }

        let url = format!("{}/artists/{}/top-tracks", self.api_url, artist_id);
        let body = self.fetch_json(&url, &options).await.map_err(wrap)?;

        let res = serde_json::from_value::<TopTracksResponse>(body)
            .map_err(|e| wrap(CatalogError::ContractViolation(format!("malformed top tracks: {e}"))))?;

        res.tracks.ok_or_else(|| {
            wrap(CatalogError::ContractViolation(
                "top tracks response has no tracks list".to_string(),
            ))
        })
    }
}
