//! Catalog domain module.
//!
//! Categories and products with derived pricing facts, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod product;
pub mod slug;

pub use category::Category;
pub use product::{LOW_STOCK_THRESHOLD, NewProduct, Product};
pub use slug::slugify;
