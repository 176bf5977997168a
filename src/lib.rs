//! Storefront catalogue engine: filtered/sorted product views plus a write-through wishlist.
//!
//! # Examples
//!
//! Deriving a view with [`core::catalogue::CatalogueStore`]:
//! ```
//! use snkrs::{core::catalogue::CatalogueStore, product::Product, types::SortOrder};
//!
//! let mut catalogue = CatalogueStore::with_products(vec![
//!     Product {
//!         id: 1,
//!         name: "Air Max".to_string(),
//!         brand: "Nike".to_string(),
//!         description: String::new(),
//!         price_minor: 120_000,
//!         image_path: None,
//!     },
//!     Product {
//!         id: 2,
//!         name: "Stan Smith".to_string(),
//!         brand: "Adidas".to_string(),
//!         description: String::new(),
//!         price_minor: 80_000,
//!         image_path: None,
//!     },
//! ]);
//! catalogue.set_sort_order(SortOrder::Ascending);
//! let ids: Vec<u64> = catalogue.view().iter().map(|p| p.id).collect();
//! assert_eq!(ids, vec![2, 1]);
//! ```
//!
//! Runtime usage with a SQLite-backed wishlist:
//! ```no_run
//! use snkrs::{
//!     config::StorefrontConfig,
//!     core::{catalogue::CatalogueStore, wishlist::WishlistStore},
//!     persist::{sqlite::SqliteSlotStore, wishlist::WishlistAdapter},
//!     remote::ContentApiClient,
//!     runtime::handle::spawn_storefront,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cfg = StorefrontConfig::default();
//! let slots = SqliteSlotStore::open(&cfg.storage_path).expect("open sqlite");
//! let wishlist = WishlistStore::open(WishlistAdapter::with_key(slots, cfg.wishlist_key.clone()));
//! let handle = spawn_storefront(CatalogueStore::new(), wishlist);
//! let client = ContentApiClient::from_config(&cfg).expect("http client");
//! let _count = handle.load_from(&client).await.expect("catalogue");
//! handle.set_search_term("air").await.expect("search");
//! let _view = handle.view().await.expect("view");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// Storefront configuration from the environment.
pub mod config;
/// Catalogue and wishlist stores.
pub mod core;
/// Durable slot storage and the wishlist adapter.
pub mod persist;
/// Product domain record.
pub mod product;
/// Content API client and wire types.
pub mod remote;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
/// Render-ready view states.
pub mod view;
