//! Product review storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shopfront_core::{ProductId, StoreError, StoreResult, UserId};
use shopfront_reviews::{average_rating, Review};

use crate::catalog_store::CatalogStore;

/// In-memory review store.
///
/// Reviews are keyed by product for the detail-page read path, but rows
/// outlive their product: deleting a product leaves its reviews readable.
/// A user may review the same product more than once.
#[derive(Debug)]
pub struct ReviewStore {
    catalog: Arc<CatalogStore>,
    reviews: RwLock<HashMap<ProductId, Vec<Review>>>,
}

impl ReviewStore {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self {
            catalog,
            reviews: RwLock::new(HashMap::new()),
        }
    }

    /// Post a review. The product must currently resolve; the rating is
    /// validated into [1, 5] by the domain constructor.
    pub fn add(
        &self,
        product_id: ProductId,
        user: UserId,
        rating: u8,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StoreResult<Review> {
        if self.catalog.product(product_id)?.is_none() {
            return Err(StoreError::ProductNotFound(product_id));
        }
        let review = Review::new(product_id, user, rating, title, body)?;

        let mut reviews = self.write()?;
        reviews.entry(product_id).or_default().push(review.clone());
        Ok(review)
    }

    /// A product's reviews, newest first.
    pub fn for_product(&self, product_id: ProductId) -> StoreResult<Vec<Review>> {
        let mut rows = self
            .read()?
            .get(&product_id)
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }

    /// Mean rating over the product's current reviews; 0.0 when none.
    /// Recomputed on every call, never cached.
    pub fn product_average_rating(&self, product_id: ProductId) -> StoreResult<f64> {
        Ok(self
            .read()?
            .get(&product_id)
            .map(|rows| average_rating(rows))
            .unwrap_or(0.0))
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<ProductId, Vec<Review>>>> {
        self.reviews
            .read()
            .map_err(|_| StoreError::conflict("review store lock poisoned"))
    }

    fn write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<ProductId, Vec<Review>>>> {
        self.reviews
            .write()
            .map_err(|_| StoreError::conflict("review store lock poisoned"))
    }
}
