//! Wishlist domain module.
//!
//! One wishlist per user; a plain product-id set with idempotent membership
//! operations.

pub mod wishlist;

pub use wishlist::Wishlist;
