//! Wishlist serialization over a single durable slot.

use crate::product::Product;

use super::{DEFAULT_WISHLIST_KEY, PersistResult, SlotStore};

/// Sole reader and writer of the wishlist slot.
///
/// The slot holds a JSON array of [`Product`] snapshots. Every save rewrites the whole
/// array; the last writer wins.
pub struct WishlistAdapter<S: SlotStore> {
    slots: S,
    key: String,
}

impl<S: SlotStore> WishlistAdapter<S> {
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_WISHLIST_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted wishlist.
    ///
    /// An absent, unreadable, or malformed slot yields an empty wishlist.
    pub fn load_wishlist(&self) -> Vec<Product> {
        let payload = match self.slots.read_slot(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "wishlist slot unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Product>>(&payload) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "wishlist slot malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Serializes `items` and replaces the slot value.
    pub fn save_wishlist(&mut self, items: &[Product]) -> PersistResult<()> {
        let payload = serde_json::to_vec(items)?;
        self.slots.write_slot(&self.key, &payload)
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }
}
