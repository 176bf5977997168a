//! Render-ready states handed to the view layer.

use crate::{product::Product, types::CatalogueStatus};

/// What the catalogue page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Initial fetch still in flight.
    Loading,
    /// Initial fetch failed; offer a retry (full reload).
    Unavailable,
    /// Catalogue loaded but nothing matches the current intent.
    NoResults,
    /// Products to render, in view order.
    Products(Vec<Product>),
}

impl ViewState {
    /// Combines the fetch status with a derived view.
    pub fn from_parts(status: CatalogueStatus, view: Vec<Product>) -> Self {
        match status {
            CatalogueStatus::Loading => Self::Loading,
            CatalogueStatus::Unavailable => Self::Unavailable,
            CatalogueStatus::Ready if view.is_empty() => Self::NoResults,
            CatalogueStatus::Ready => Self::Products(view),
        }
    }

    pub fn products(&self) -> &[Product] {
        match self {
            Self::Products(items) => items,
            _ => &[],
        }
    }
}

/// What the wishlist page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistView {
    Empty,
    Items(Vec<Product>),
}

impl WishlistView {
    pub fn from_items(items: Vec<Product>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Items(items)
        }
    }

    /// Badge count shown next to the wishlist link.
    pub fn count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Items(items) => items.len(),
        }
    }
}
