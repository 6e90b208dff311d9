//! Persisted-state layer: in-memory stores and the operations over them.
//!
//! The stores model the logical persisted layout (categories, products,
//! orders + items, wishlists, reviews) with per-product row versioning so
//! concurrent checkouts serialize on shared products instead of losing
//! updates.

pub mod catalog_store;
pub mod order_ledger;
pub mod review_store;
pub mod wishlist_store;


pub use catalog_store::{CatalogStore, StockDecrement};
pub use order_ledger::{DashboardStats, OrderLedger};
pub use review_store::ReviewStore;
pub use wishlist_store::WishlistStore;
