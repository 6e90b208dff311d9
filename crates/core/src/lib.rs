//! `shopfront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod version;

pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::{CategoryId, OrderId, ProductId, ReviewId, SessionId, UserId};
pub use version::ExpectedVersion;
