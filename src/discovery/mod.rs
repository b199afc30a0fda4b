mod resolver;

pub use resolver::{
    GENRE_SEARCH_LIMIT, MAX_RELATED_ARTISTS, NAME_SEARCH_LIMIT, RelatedArtistResolver,
    SearchStrategy,
};
