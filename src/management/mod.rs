mod artist;
mod store;

pub use artist::ArtistDataCache;
pub use artist::PersistPolicy;
pub use store::DurableStore;
pub use store::JsonFileStore;
pub use store::MemoryStore;
