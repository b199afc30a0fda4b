//! Error taxonomy shared by every layer of the library.
//!
//! Fatal conditions (validation, contract violations, authentication that
//! still fails after a refresh) surface as a [`CatalogError`]. Degraded paths
//! such as a failing genre search or a missing top-track list never reach this
//! type: they are logged where they happen and execution continues.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required input was missing. Raised before any network call is issued.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The bearer token was rejected, even after one forced refresh.
    #[error("Authentication failed with status {status}")]
    Authentication { status: u16 },

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// The response body did not have the documented shape.
    #[error("Upstream contract violation: {0}")]
    ContractViolation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Artist search failed for '{query}'")]
    Search {
        query: String,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("Failed to fetch artist details for {artist_id}")]
    ArtistDetails {
        artist_id: String,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("Failed to fetch top tracks for {artist_id}")]
    TopTracks {
        artist_id: String,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("No artist image found for {artist_id}")]
    NoArtistImage { artist_id: String },

    #[error("Failed to resolve related artists for {artist_id}")]
    RelatedArtists {
        artist_id: String,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CatalogError {
    /// Whether this error (or the error it wraps) is a rejected token.
    pub fn is_authentication(&self) -> bool {
        match self {
            CatalogError::Authentication { .. } => true,
            CatalogError::Search { source, .. }
            | CatalogError::ArtistDetails { source, .. }
            | CatalogError::TopTracks { source, .. }
            | CatalogError::RelatedArtists { source, .. } => source.is_authentication(),
            _ => false,
        }
    }

    /// Whether this error (or the error it wraps) signals a malformed response.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            CatalogError::ContractViolation(_) => true,
            CatalogError::Search { source, .. }
            | CatalogError::ArtistDetails { source, .. }
            | CatalogError::TopTracks { source, .. }
            | CatalogError::RelatedArtists { source, .. } => source.is_contract_violation(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

impl From<std::env::VarError> for CatalogError {
    fn from(err: std::env::VarError) -> Self {
        CatalogError::Configuration(err.to_string())
    }
}
