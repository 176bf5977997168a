use hashbrown::HashSet;

use crate::{
    core::indices::{PosIndex, rebuild_positions},
    persist::{PersistResult, SlotStore, wishlist::WishlistAdapter},
    product::Product,
    types::ProductId,
};

/// Membership change produced by [`WishlistStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The product snapshot was appended.
    Added,
    /// The product with the same id was removed.
    Removed,
}

/// Wishlisted product snapshots with write-through persistence.
pub struct WishlistStore<S: SlotStore> {
    items: Vec<Product>,
    pos: PosIndex,
    adapter: WishlistAdapter<S>,
}

impl<S: SlotStore> WishlistStore<S> {
    /// Builds the store from whatever the adapter's slot currently holds.
    pub fn open(adapter: WishlistAdapter<S>) -> Self {
        let mut seen: HashSet<ProductId> = HashSet::new();
        let items: Vec<Product> = adapter
            .load_wishlist()
            .into_iter()
            .filter(|p| seen.insert(p.id))
            .collect();

        let mut store = Self {
            items,
            pos: PosIndex::new(),
            adapter,
        };
        rebuild_positions(&mut store.pos, &store.items);
        tracing::debug!(count = store.items.len(), "wishlist restored");
        store
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.pos.contains_key(&id)
    }

    /// Removes the product if its id is present, otherwise appends a snapshot of it,
    /// then writes the full collection through to the adapter.
    ///
    /// The in-memory change stands even when the write fails; the write result is
    /// returned alongside it.
    pub fn toggle(&mut self, product: &Product) -> (Toggled, PersistResult<()>) {
        let change = if let Some(idx) = self.pos.get(&product.id).copied() {
            self.items.remove(idx);
            rebuild_positions(&mut self.pos, &self.items);
            Toggled::Removed
        } else {
            self.pos.insert(product.id, self.items.len());
            self.items.push(product.clone());
            Toggled::Added
        };

        let persisted = self.adapter.save_wishlist(&self.items);
        if let Err(err) = &persisted {
            tracing::warn!(id = product.id, error = %err, "wishlist write-through failed");
        }
        (change, persisted)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.pos.get(&id).and_then(|idx| self.items.get(*idx))
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn adapter(&self) -> &WishlistAdapter<S> {
        &self.adapter
    }
}
