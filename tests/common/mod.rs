#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use artistdig::{
    CatalogError, Result,
    spotify::Catalog,
    types::{ArtistSummary, Image, Track},
};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String, Option<u32>),
    Artist(String),
    TopTracks(String),
}

/// In-memory catalog recording every call it receives.
#[derive(Default)]
pub struct FakeCatalog {
    pub artists: HashMap<String, ArtistSummary>,
    pub searches: HashMap<String, Vec<ArtistSummary>>,
    pub failing_searches: HashSet<String>,
    pub top_tracks: HashMap<String, Vec<Track>>,
    /// Per search query or artist id, how long the call takes.
    pub latencies: HashMap<String, Duration>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, artist: ArtistSummary) -> Self {
        self.artists.insert(artist.id.clone(), artist);
        self
    }

    /// Answers detail lookups for `requested_id` with `artist`, whatever its id.
    pub fn with_artist_as(mut self, requested_id: &str, artist: ArtistSummary) -> Self {
        self.artists.insert(requested_id.to_string(), artist);
        self
    }

    pub fn with_latency(mut self, key: &str, latency: Duration) -> Self {
        self.latencies.insert(key.to_string(), latency);
        self
    }

    pub fn with_search(mut self, query: &str, results: Vec<ArtistSummary>) -> Self {
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    pub fn with_top_tracks(mut self, artist_id: &str, track_ids: &[&str]) -> Self {
        let tracks = track_ids.iter().map(|id| track(id)).collect();
        self.top_tracks.insert(artist_id.to_string(), tracks);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<(String, Option<u32>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(q, l) => Some((q, l)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait(&self, key: &str) {
        if let Some(latency) = self.latencies.get(key) {
            tokio::time::sleep(*latency).await;
        }
    }
}

fn upstream(status: u16) -> Box<CatalogError> {
    Box::new(CatalogError::UpstreamStatus {
        status,
        url: "fake".to_string(),
    })
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_artists(&self, query: &str, limit: Option<u32>) -> Result<Vec<ArtistSummary>> {
        self.record(Call::Search(query.to_string(), limit));
        self.wait(query).await;
        if self.failing_searches.contains(query) {
            return Err(CatalogError::Search {
                query: query.to_string(),
                source: upstream(500),
            });
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn get_artist(&self, artist_id: &str) -> Result<ArtistSummary> {
        self.record(Call::Artist(artist_id.to_string()));
        self.wait(artist_id).await;
        self.artists
            .get(artist_id)
            .cloned()
            .ok_or_else(|| CatalogError::ArtistDetails {
                artist_id: artist_id.to_string(),
                source: upstream(404),
            })
    }

    async fn get_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        self.record(Call::TopTracks(artist_id.to_string()));
        self.top_tracks
            .get(artist_id)
            .cloned()
            .ok_or_else(|| CatalogError::TopTracks {
                artist_id: artist_id.to_string(),
                source: upstream(503),
            })
    }
}

pub fn artist(id: &str, popularity: u32) -> ArtistSummary {
    ArtistSummary {
        id: id.to_string(),
        name: format!("Artist {id}"),
        popularity,
        genres: Vec::new(),
        images: vec![Image {
            url: format!("https://img.example.com/{id}.jpg"),
        }],
    }
}

pub fn seed(id: &str, name: &str, popularity: u32, genres: &[&str]) -> ArtistSummary {
    ArtistSummary {
        id: id.to_string(),
        name: name.to_string(),
        popularity,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        images: vec![Image {
            url: format!("https://img.example.com/{id}.jpg"),
        }],
    }
}

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {id}"),
        preview_url: None,
    }
}

pub fn ids(artists: &[ArtistSummary]) -> Vec<&str> {
    artists.iter().map(|a| a.id.as_str()).collect()
}
