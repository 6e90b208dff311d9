//! Per-user wishlist storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shopfront_core::{ProductId, StoreError, StoreResult, UserId};
use shopfront_wishlist::Wishlist;

use crate::catalog_store::CatalogStore;

/// In-memory wishlist store, one wishlist per user (created lazily).
#[derive(Debug)]
pub struct WishlistStore {
    catalog: Arc<CatalogStore>,
    wishlists: RwLock<HashMap<UserId, Wishlist>>,
}

impl WishlistStore {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self {
            catalog,
            wishlists: RwLock::new(HashMap::new()),
        }
    }

    /// Idempotent set-insert. The product must currently resolve; adding it
    /// twice is a no-op, not an error.
    pub fn add(&self, user: UserId, product_id: ProductId) -> StoreResult<()> {
        if self.catalog.product(product_id)?.is_none() {
            return Err(StoreError::ProductNotFound(product_id));
        }
        let mut wishlists = self.write()?;
        wishlists.entry(user).or_default().add(product_id);
        Ok(())
    }

    /// Idempotent set-removal. Removing an absent product is a no-op.
    pub fn remove(&self, user: UserId, product_id: ProductId) -> StoreResult<()> {
        let mut wishlists = self.write()?;
        if let Some(wishlist) = wishlists.get_mut(&user) {
            wishlist.remove(product_id);
        }
        Ok(())
    }

    pub fn contains(&self, user: UserId, product_id: ProductId) -> StoreResult<bool> {
        Ok(self
            .read()?
            .get(&user)
            .is_some_and(|wishlist| wishlist.contains(product_id)))
    }

    /// The user's wishlist (empty for users who never added anything).
    pub fn wishlist(&self, user: UserId) -> StoreResult<Wishlist> {
        Ok(self.read()?.get(&user).cloned().unwrap_or_default())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<UserId, Wishlist>>> {
        self.wishlists
            .read()
            .map_err(|_| StoreError::conflict("wishlist store lock poisoned"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<UserId, Wishlist>>> {
        self.wishlists
            .write()
            .map_err(|_| StoreError::conflict("wishlist store lock poisoned"))
    }
}
