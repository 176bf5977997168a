pub mod sqlite;
pub mod wishlist;

/// Default slot name holding the serialized wishlist.
pub const DEFAULT_WISHLIST_KEY: &str = "wishlist";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Durable client-local storage addressed by slot name.
///
/// Writes replace the whole slot value; there are no partial updates.
pub trait SlotStore: Send {
    fn read_slot(&self, key: &str) -> PersistResult<Option<Vec<u8>>>;
    fn write_slot(&mut self, key: &str, payload: &[u8]) -> PersistResult<()>;
}
