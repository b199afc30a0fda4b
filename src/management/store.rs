use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::error::{CatalogError, Result};

/// A single string slot that survives the in-memory cache.
///
/// Read once when a cache starts, then only overwritten.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<String>>;

    async fn save(&self, snapshot: &str) -> Result<()>;
}

/// JSON snapshot file, by default under the local data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DurableStore for JsonFileStore {
    async fn load(&self) -> Result<Option<String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CatalogError::Storage(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, snapshot: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&self.path, snapshot).await?;
        Ok(())
    }
}

/// Process-local slot, for sessions that should not touch disk.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot.into())),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or_default()
    }

    /// Number of `save` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot())
    }

    async fn save(&self, snapshot: &str) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        *slot = Some(snapshot.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
