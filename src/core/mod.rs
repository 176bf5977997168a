//! In-memory catalogue and wishlist stores.

/// Catalogue source collection, intent, and derived view.
pub mod catalogue;
/// Helper index aliases.
pub mod indices;
/// Write-through wishlist store.
pub mod wishlist;
