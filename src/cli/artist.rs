use std::sync::Arc;

use crate::{
    cli, error, info,
    management::{ArtistDataCache, JsonFileStore},
    success,
};

pub async fn artist(artist_id: String) {
    let settings = cli::settings();
    let catalog = cli::catalog(&settings);
    let store = Arc::new(JsonFileStore::new(settings.cache_path.clone()));
    let cache = ArtistDataCache::load(catalog, store).await;

    let pb = cli::spinner("Fetching artist data...");
    let result = cache.get_artist_data(&artist_id).await;
    pb.finish_and_clear();

    match result {
        Ok(entry) => {
            success!("Artist {}", artist_id);
            info!("Image: {}", entry.artist_image_url);
            if entry.top_track_ids.is_empty() {
                info!("Top tracks: none available");
            } else {
                info!("Top tracks: {}", entry.top_track_ids.join(", "));
            }
        }
        Err(e) => error!("Failed to get artist data. Err: {}", e),
    }
}
