use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::{
    error::{CatalogError, Result},
    management::store::DurableStore,
    spotify::Catalog,
    types::ArtistCacheEntry,
};

/// When the in-memory map is mirrored to the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    /// Write the whole snapshot after every insertion.
    #[default]
    WriteThrough,
    /// Write the whole snapshot once `max_pending` insertions have piled up,
    /// or on [`ArtistDataCache::flush`].
    Batched { max_pending: usize },
}

struct CacheState {
    entries: HashMap<String, Arc<ArtistCacheEntry>>,
    pending_writes: usize,
}

/// Per-artist image URL and top-track ids, memoized for the session.
///
/// The map is seeded once from the durable store by [`ArtistDataCache::load`].
/// After that the store is only written, always as one wholesale JSON snapshot
/// `{ "<artist id>": { "artistImageUrl": ..., "topTrackIds": [...] } }`.
pub struct ArtistDataCache {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn DurableStore>,
    policy: PersistPolicy,
    state: Mutex<CacheState>,
}

impl ArtistDataCache {
    /// Starts a cache from whatever snapshot the store holds. A missing or
    /// unreadable snapshot starts an empty cache.
    pub async fn load(catalog: Arc<dyn Catalog>, store: Arc<dyn DurableStore>) -> Self {
        let entries = match store.load().await {
            Ok(Some(snapshot)) => parse_snapshot(&snapshot),
            Ok(None) => HashMap::new(),
            Err(e) => {
                log::warn!("Failed to read artist cache snapshot, starting empty: {e}");
                HashMap::new()
            }
        };
        log::debug!("Artist cache loaded with {} entries", entries.len());

        Self {
            catalog,
            store,
            policy: PersistPolicy::default(),
            state: Mutex::new(CacheState {
                entries,
                pending_writes: 0,
            }),
        }
    }

    pub fn with_policy(mut self, policy: PersistPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the cached entry for `artist_id`, fetching and caching it on a
    /// miss.
    ///
    /// A hit returns the very same `Arc` without touching the network. On a
    /// miss the artist's first image is required: without one the call fails
    /// with [`CatalogError::NoArtistImage`] and nothing is cached. Top tracks
    /// are best effort and fall back to an empty list.
    ///
    /// Concurrent misses for the same id each fetch, but the first entry
    /// stored wins and every caller gets that `Arc`.
    pub async fn get_artist_data(&self, artist_id: &str) -> Result<Arc<ArtistCacheEntry>> {
        let artist_id = artist_id.trim();
        if artist_id.is_empty() {
            return Err(CatalogError::Validation("artist id is required".to_string()));
        }

        if let Some(entry) = self.cached(artist_id).await {
            log::debug!("Artist cache hit for {artist_id}");
            return Ok(entry);
        }
        log::debug!("Artist cache miss for {artist_id}");

        let artist = self.catalog.get_artist(artist_id).await?;
        let artist_image_url = artist
            .primary_image_url()
            .ok_or_else(|| CatalogError::NoArtistImage {
                artist_id: artist_id.to_string(),
            })?
            .to_string();

        let top_track_ids = match self.catalog.get_top_tracks(artist_id).await {
            Ok(tracks) => tracks.into_iter().map(|t| t.id).collect(),
            Err(e) => {
                log::warn!("Top tracks unavailable for {artist_id}, caching without them: {e}");
                Vec::new()
            }
        };

        let entry = ArtistCacheEntry {
            artist_image_url,
            top_track_ids,
        };
        Ok(self.insert(artist_id, entry, false).await)
    }

    /// Puts an entry into the cache directly, replacing any existing one.
    pub async fn set_artist_data(
        &self,
        artist_id: &str,
        entry: ArtistCacheEntry,
    ) -> Result<Arc<ArtistCacheEntry>> {
        let artist_id = artist_id.trim();
        if artist_id.is_empty() {
            return Err(CatalogError::Validation("artist id is required".to_string()));
        }
        if entry.artist_image_url.is_empty() {
            return Err(CatalogError::NoArtistImage {
                artist_id: artist_id.to_string(),
            });
        }
        Ok(self.insert(artist_id, entry, true).await)
    }

    pub async fn cached(&self, artist_id: &str) -> Option<Arc<ArtistCacheEntry>> {
        self.state.lock().await.entries.get(artist_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Writes the snapshot now if any insertion has not been persisted yet.
    pub async fn flush(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.pending_writes == 0 {
            return Ok(());
        }
        self.persist(&mut state).await
    }

    async fn insert(
        &self,
        artist_id: &str,
        entry: ArtistCacheEntry,
        replace: bool,
    ) -> Arc<ArtistCacheEntry> {
        let mut state = self.state.lock().await;
        if !replace {
            if let Some(existing) = state.entries.get(artist_id) {
                return Arc::clone(existing);
            }
        }

        let entry = Arc::new(entry);
        state.entries.insert(artist_id.to_string(), Arc::clone(&entry));
        state.pending_writes += 1;

        let due = match self.policy {
            PersistPolicy::WriteThrough => true,
            PersistPolicy::Batched { max_pending } => state.pending_writes >= max_pending.max(1),
        };
        if due {
            // the in-memory entry stays valid even if the mirror write fails
            if let Err(e) = self.persist(&mut state).await {
                log::warn!("Failed to persist artist cache snapshot: {e}");
            }
        }

        entry
    }

    async fn persist(&self, state: &mut CacheState) -> Result<()> {
        let snapshot = serialize_snapshot(&state.entries)?;
        self.store.save(&snapshot).await?;
        state.pending_writes = 0;
        Ok(())
    }
}

fn parse_snapshot(snapshot: &str) -> HashMap<String, Arc<ArtistCacheEntry>> {
    match serde_json::from_str::<HashMap<String, ArtistCacheEntry>>(snapshot) {
        Ok(entries) => entries
            .into_iter()
            .filter(|(_, entry)| !entry.artist_image_url.is_empty())
            .map(|(id, entry)| (id, Arc::new(entry)))
            .collect(),
        Err(e) => {
            log::warn!("Artist cache snapshot is not valid JSON, starting empty: {e}");
            HashMap::new()
        }
    }
}

fn serialize_snapshot(entries: &HashMap<String, Arc<ArtistCacheEntry>>) -> Result<String> {
    let ordered: BTreeMap<&str, &ArtistCacheEntry> = entries
        .iter()
        .map(|(id, entry)| (id.as_str(), entry.as_ref()))
        .collect();
    Ok(serde_json::to_string(&ordered)?)
}
