use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{Entity, ProductId, ReviewId, StoreError, StoreResult, UserId};

/// Valid rating range, inclusive.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// A shopper's review of a product.
///
/// The product reference is weak: reviews survive product deletion and are
/// resolved through the catalog store. A user may post multiple reviews for
/// the same product (no uniqueness constraint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    product_id: ProductId,
    user: UserId,
    /// Stars in [1, 5].
    rating: u8,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        product_id: ProductId,
        user: UserId,
        rating: u8,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StoreResult<Self> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(StoreError::validation(format!(
                "rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"
            )));
        }

        Ok(Self {
            id: ReviewId::new(),
            product_id,
            user,
            rating,
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
        })
    }

    pub fn id_typed(&self) -> ReviewId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Mean rating over a set of reviews; 0.0 when there are none.
///
/// Always recomputed from the rows handed in, never cached.
pub fn average_rating<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> f64 {
    let mut sum = 0u64;
    let mut count = 0u64;
    for review in reviews {
        sum += u64::from(review.rating);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
