use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use shopfront_core::ProductId;

/// One user's wishlist: an unordered set of product references.
///
/// Membership operations are idempotent in both directions: adding a present
/// product and removing an absent one are no-ops, never errors. Product
/// references are weak; a deleted product simply stops resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    products: HashSet<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set-insert. Returns whether the product was newly added.
    pub fn add(&mut self, product_id: ProductId) -> bool {
        self.products.insert(product_id)
    }

    /// Set-removal. Returns whether the product was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        self.products.remove(&product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.contains(&product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Iterate members (no ordering guarantee).
    pub fn products(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.iter().copied()
    }
}
