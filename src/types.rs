use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    // missing popularity ranks as 0
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl ArtistSummary {
    /// URL of the first listed image, if it is non-empty.
    pub fn primary_image_url(&self) -> Option<&str> {
        self.images
            .first()
            .map(|image| image.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Derived per-artist data kept by the artist cache.
///
/// Serialized in camelCase so the durable snapshot stays a plain
/// `{ "<id>": { "artistImageUrl": ..., "topTrackIds": [...] } }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistCacheEntry {
    pub artist_image_url: String,
    #[serde(default)]
    pub top_track_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Option<Vec<Track>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub results: Vec<ArtistSummary>,
    pub is_searching: bool,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub genres: String,
}

#[derive(Tabled)]
pub struct RelatedTableRow {
    pub name: String,
    pub popularity: u32,
    pub distance: u32,
    pub genres: String,
}
