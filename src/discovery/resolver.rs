use std::sync::Arc;

use crate::{
    error::{CatalogError, Result},
    spotify::Catalog,
    types::ArtistSummary,
    utils,
};

pub const GENRE_SEARCH_LIMIT: u32 = 30;
pub const NAME_SEARCH_LIMIT: u32 = 50;
pub const MAX_RELATED_ARTISTS: usize = 10;

/// One way of producing related-artist candidates from search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStrategy {
    /// `genre:"<genre>"` search, one per seed genre.
    Genre(String),
    /// Literal search on the seed artist's name.
    Name(String),
}

impl SearchStrategy {
    pub fn query(&self) -> String {
        match self {
            SearchStrategy::Genre(genre) => utils::genre_query(genre),
            SearchStrategy::Name(name) => name.clone(),
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            SearchStrategy::Genre(_) => GENRE_SEARCH_LIMIT,
            SearchStrategy::Name(_) => NAME_SEARCH_LIMIT,
        }
    }
}

/// Candidates in discovery order, never the seed.
///
/// The seed is excluded under both the id the caller asked for and the id the
/// detail lookup answered with, which can differ when upstream canonicalizes.
struct Discovered {
    seed_ids: [String; 2],
    artists: Vec<ArtistSummary>,
}

impl Discovered {
    fn new(requested_id: &str, seed_id: &str) -> Self {
        Self {
            seed_ids: [requested_id.to_string(), seed_id.to_string()],
            artists: Vec::new(),
        }
    }

    fn absorb(mut self, found: Vec<ArtistSummary>) -> Self {
        let seed_ids = &self.seed_ids;
        self.artists
            .extend(found.into_iter().filter(|a| !seed_ids.contains(&a.id)));
        self
    }

    fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Unique by id, first occurrence wins.
    fn into_unique(mut self) -> Vec<ArtistSummary> {
        utils::remove_duplicate_artists(&mut self.artists);
        self.artists
    }
}

/// Synthesizes "related artists" for a seed artist out of plain search.
///
/// The catalog offers no direct relation, so candidates come from:
/// 1. a genre search for each of the seed's genres, in listed order
/// 2. a search on the seed's name, always run
///
/// Candidates are merged in that order (first occurrence wins), ranked by
/// ascending `|popularity - seed.popularity|` with ties kept in discovery
/// order, and cut to [`MAX_RELATED_ARTISTS`].
///
/// # Failure policy
///
/// - Missing artist id: [`CatalogError::Validation`] before any request.
/// - Seed detail lookup fails: fatal.
/// - A single genre search fails: logged, that genre contributes nothing.
/// - Name search fails: logged if genre search found candidates, otherwise
///   fatal, reported as [`CatalogError::RelatedArtists`] naming the seed.
pub struct RelatedArtistResolver {
    catalog: Arc<dyn Catalog>,
}

impl RelatedArtistResolver {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    pub async fn get_related_artists(&self, artist_id: &str) -> Result<Vec<ArtistSummary>> {
        let (_, related) = self.resolve(artist_id).await?;
        Ok(related)
    }

    /// Like [`get_related_artists`](Self::get_related_artists), also handing
    /// back the seed artist the ranking was computed against.
    pub async fn resolve(&self, artist_id: &str) -> Result<(ArtistSummary, Vec<ArtistSummary>)> {
        let artist_id = artist_id.trim();
        if artist_id.is_empty() {
            return Err(CatalogError::Validation("artist id is required".to_string()));
        }

        let seed = self
            .catalog
            .get_artist(artist_id)
            .await
            .map_err(|e| CatalogError::RelatedArtists {
                artist_id: artist_id.to_string(),
                source: Box::new(e),
            })?;

        let mut discovered = Discovered::new(artist_id, &seed.id);

        // sequential on purpose: merge order is genre-list order
        for genre in &seed.genres {
            let strategy = SearchStrategy::Genre(genre.clone());
            match self.run(&strategy).await {
                Ok(found) => discovered = discovered.absorb(found),
                Err(e) => log::warn!("Genre search '{genre}' failed for {artist_id}: {e}"),
            }
        }

        let strategy = SearchStrategy::Name(seed.name.clone());
        match self.run(&strategy).await {
            Ok(found) => discovered = discovered.absorb(found),
            Err(e) if discovered.is_empty() => {
                return Err(CatalogError::RelatedArtists {
                    artist_id: artist_id.to_string(),
                    source: Box::new(e),
                });
            }
            Err(e) => log::warn!("Name search failed for {artist_id}, keeping genre matches: {e}"),
        }

        let mut related = discovered.into_unique();
        utils::rank_by_popularity_distance(&mut related, seed.popularity, MAX_RELATED_ARTISTS);
        log::debug!("Resolved {} related artists for {artist_id}", related.len());

        Ok((seed, related))
    }

    async fn run(&self, strategy: &SearchStrategy) -> Result<Vec<ArtistSummary>> {
        self.catalog
            .search_artists(&strategy.query(), Some(strategy.limit()))
            .await
    }
}
