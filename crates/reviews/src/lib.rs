//! Review domain module.
//!
//! Star ratings with free-text title/body, layered on the catalog with no
//! invariant beyond the [1, 5] rating range.

pub mod review;

pub use review::{average_rating, RATING_MAX, RATING_MIN, Review};
