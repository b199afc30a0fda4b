use tabled::Table;

use crate::{cli, discovery::RelatedArtistResolver, error, success, utils, warning};

pub async fn related(artist_id: String) {
    let settings = cli::settings();
    let resolver = RelatedArtistResolver::new(cli::catalog(&settings));

    let pb = cli::spinner("Resolving related artists...");
    let result = resolver.resolve(&artist_id).await;
    pb.finish_and_clear();

    let (seed, related) = match result {
        Ok(r) => r,
        Err(e) => error!("Cannot resolve related artists. Err: {}", e),
    };

    if related.is_empty() {
        warning!("No related artists found for {}.", seed.name);
        return;
    }

    success!(
        "{} artists related to {} (popularity {})",
        related.len(),
        seed.name,
        seed.popularity
    );
    println!("{}", Table::new(utils::related_table_rows(&related, seed.popularity)));
}
