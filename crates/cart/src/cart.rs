use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopfront_core::{ProductId, StoreError, StoreResult};

/// A shopper's transient selection: product id → quantity.
///
/// Carts live only for the duration of a session and are never durably
/// persisted; checkout snapshots their contents into an order and clears
/// them. A cart is single-writer (one session, one shopper).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: BTreeMap<ProductId, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product, merging with any existing line.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) -> StoreResult<()> {
        if quantity == 0 {
            return Err(StoreError::validation("quantity must be at least 1"));
        }
        let line = self.entries.entry(product_id).or_insert(0);
        *line = line.saturating_add(quantity);
        Ok(())
    }

    /// Drop a product line. Removing an absent line is a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.entries.remove(&product_id);
    }

    pub fn quantity(&self, product_id: ProductId) -> Option<u32> {
        self.entries.get(&product_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate lines as `(product_id, quantity)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.entries.iter().map(|(id, qty)| (*id, *qty))
    }
}
