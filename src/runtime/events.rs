//! Runtime event stream payloads.

use crate::types::ProductId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontEvent {
    /// The source collection was loaded.
    CatalogueLoaded {
        /// Products kept after de-duplication.
        count: usize,
    },
    /// The initial fetch failed.
    CatalogueUnavailable,
    /// The derived view was recomputed.
    ViewChanged {
        /// Visible product count.
        len: usize,
    },
    /// Wishlist membership flipped for one product.
    WishlistToggled {
        /// Toggled product id.
        id: ProductId,
        /// True when the product was added.
        added: bool,
    },
    /// The write-through after a toggle failed; memory and storage now differ.
    WishlistPersistFailed {
        /// Toggled product id.
        id: ProductId,
    },
}
