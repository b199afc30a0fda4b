use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::{ArtistSummary, ArtistTableRow, RelatedTableRow};

/// Builds the `Authorization` value for the client-credentials exchange.
///
/// # Example
///
/// ```
/// assert_eq!(basic_credential("client", "secret"), "Basic Y2xpZW50OnNlY3JldA==");
/// ```
pub fn basic_credential(client_id: &str, client_secret: &str) -> String {
    let raw = format!("{client_id}:{client_secret}");
    format!("Basic {}", STANDARD.encode(raw))
}

/// Absolute popularity difference between a candidate and the seed.
pub fn popularity_distance(candidate: &ArtistSummary, seed_popularity: u32) -> u32 {
    candidate.popularity.abs_diff(seed_popularity)
}

/// Removes repeated artist ids in place, keeping the first occurrence.
pub fn remove_duplicate_artists(artists: &mut Vec<ArtistSummary>) {
    let mut seen_ids = HashSet::new();
    artists.retain(|artist| seen_ids.insert(artist.id.clone()));
}

/// Sorts by ascending [`popularity_distance`] to `seed_popularity` and keeps
/// the first `limit` artists.
///
/// The sort is stable, so equal distances keep discovery order.
///
/// # Example
///
/// ```
/// rank_by_popularity_distance(&mut candidates, seed.popularity, 10);
/// ```
pub fn rank_by_popularity_distance(
    artists: &mut Vec<ArtistSummary>,
    seed_popularity: u32,
    limit: usize,
) {
    artists.sort_by_key(|artist| popularity_distance(artist, seed_popularity));
    artists.truncate(limit);
}

/// Search query restricting matches to one genre: `genre:"<genre>"`.
pub fn genre_query(genre: &str) -> String {
    format!("genre:\"{genre}\"")
}

fn joined_genres(artist: &ArtistSummary) -> String {
    artist
        .genres
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(",")
}

pub fn artist_table_rows(artists: &[ArtistSummary]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            id: a.id.clone(),
            name: a.name.clone(),
            popularity: a.popularity,
            genres: joined_genres(a),
        })
        .collect()
}

/// Table rows for ranked related artists, with each row's distance to the seed.
pub fn related_table_rows(artists: &[ArtistSummary], seed_popularity: u32) -> Vec<RelatedTableRow> {
    artists
        .iter()
        .map(|a| RelatedTableRow {
            name: a.name.clone(),
            popularity: a.popularity,
            distance: popularity_distance(a, seed_popularity),
            genres: joined_genres(a),
        })
        .collect()
}
