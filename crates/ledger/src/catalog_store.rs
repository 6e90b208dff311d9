//! In-memory persisted state for categories and products.
//!
//! Product rows are versioned: every write bumps the row version, and batch
//! stock commits verify the versions their caller read before applying
//! anything. That gives stock updates per-product serialization (optimistic
//! compare-and-swap) without holding locks across the caller's read phase.

use std::collections::HashMap;
use std::sync::RwLock;

use shopfront_catalog::{Category, Product};
use shopfront_core::{CategoryId, ExpectedVersion, ProductId, StoreError, StoreResult};

/// A stock decrement staged by the order ledger: how many units to remove
/// and the row version the decision was based on.
#[derive(Debug, Clone, Copy)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub quantity: u32,
    pub read_version: u64,
}

#[derive(Debug, Clone)]
struct ProductRow {
    version: u64,
    product: Product,
}

/// In-memory catalog store.
///
/// Intended for tests/dev and as the reference storage semantics. Not
/// optimized for performance.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: RwLock<HashMap<ProductId, ProductRow>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- categories ---

    /// Insert a category, enforcing name/slug uniqueness.
    pub fn insert_category(&self, category: Category) -> StoreResult<CategoryId> {
        let mut categories = self.categories_write()?;
        for existing in categories.values() {
            if existing.name() == category.name() {
                return Err(StoreError::conflict(format!(
                    "category name already exists: {}",
                    category.name()
                )));
            }
            if existing.slug() == category.slug() {
                return Err(StoreError::conflict(format!(
                    "category slug already exists: {}",
                    category.slug()
                )));
            }
        }
        let id = category.id_typed();
        categories.insert(id, category);
        Ok(id)
    }

    pub fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.categories_read()?.get(&id).cloned())
    }

    /// All categories, ordered by name.
    pub fn categories(&self) -> StoreResult<Vec<Category>> {
        let mut all: Vec<Category> = self.categories_read()?.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    /// Delete a category. Products referencing it keep existing with their
    /// category reference cleared.
    pub fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut categories = self.categories_write()?;
        if categories.remove(&id).is_none() {
            return Err(StoreError::not_found());
        }
        drop(categories);

        let mut products = self.products_write()?;
        for row in products.values_mut() {
            if row.product.category() == Some(id) {
                row.product.set_category(None);
                row.version += 1;
            }
        }
        Ok(())
    }

    // --- products ---

    pub fn insert_product(&self, product: Product) -> StoreResult<ProductId> {
        let mut products = self.products_write()?;
        let id = product.id_typed();
        products.insert(id, ProductRow {
            version: 1,
            product,
        });
        Ok(id)
    }

    pub fn product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.products_read()?.get(&id).map(|row| row.product.clone()))
    }

    /// Current row (version + product) for optimistic read-then-write flows.
    pub fn product_versioned(&self, id: ProductId) -> StoreResult<Option<(u64, Product)>> {
        Ok(self
            .products_read()?
            .get(&id)
            .map(|row| (row.version, row.product.clone())))
    }

    /// Active product by slug (storefront detail page lookup).
    pub fn product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .products_read()?
            .values()
            .find(|row| row.product.slug() == slug && row.product.is_active())
            .map(|row| row.product.clone()))
    }

    /// Active products, newest first.
    pub fn active_products(&self) -> StoreResult<Vec<Product>> {
        let mut active: Vec<Product> = self
            .products_read()?
            .values()
            .filter(|row| row.product.is_active())
            .map(|row| row.product.clone())
            .collect();
        active.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(active)
    }

    /// Active products in a category, newest first.
    pub fn products_in_category(&self, category: CategoryId) -> StoreResult<Vec<Product>> {
        let mut matching: Vec<Product> = self
            .products_read()?
            .values()
            .filter(|row| row.product.is_active() && row.product.category() == Some(category))
            .map(|row| row.product.clone())
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    /// Up to `limit` other active products from the same category.
    pub fn related_products(&self, id: ProductId, limit: usize) -> StoreResult<Vec<Product>> {
        let Some(product) = self.product(id)? else {
            return Ok(vec![]);
        };
        let Some(category) = product.category() else {
            return Ok(vec![]);
        };

        let mut related = self.products_in_category(category)?;
        related.retain(|p| p.id_typed() != id);
        related.truncate(limit);
        Ok(related)
    }

    /// Products below the low-stock threshold (staff dashboard).
    pub fn low_stock_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self
            .products_read()?
            .values()
            .filter(|row| row.product.is_low_stock())
            .map(|row| row.product.clone())
            .collect())
    }

    /// Administrative single-product write (price edit, restock, activate).
    ///
    /// `expected` guards against lost updates: pass the version you read, or
    /// `ExpectedVersion::Any` for blind writes.
    pub fn update_product(
        &self,
        id: ProductId,
        expected: ExpectedVersion,
        f: impl FnOnce(&mut Product) -> StoreResult<()>,
    ) -> StoreResult<Product> {
        let mut products = self.products_write()?;
        let row = products.get_mut(&id).ok_or(StoreError::NotFound)?;
        expected.check(row.version)?;

        // Stage on a clone so a failed edit leaves the row untouched.
        let mut staged = row.product.clone();
        f(&mut staged)?;
        row.product = staged;
        row.version += 1;
        Ok(row.product.clone())
    }

    /// Delete a product. Historical orders, reviews, and wishlists keep
    /// their id; resolution simply reports absent from now on.
    pub fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut products = self.products_write()?;
        if products.remove(&id).is_none() {
            return Err(StoreError::not_found());
        }
        Ok(())
    }

    // --- batch stock commits (order ledger) ---

    /// Apply a batch of stock decrements all-or-nothing.
    ///
    /// Every row's current version must equal the version the caller read
    /// (else `Conflict`, nothing applied, and the caller re-reads and retries),
    /// and every decrement must fit in the current stock (else
    /// `InsufficientStock`, nothing applied). Mutations are staged on clones
    /// and swapped in only after the whole batch passes.
    pub fn commit_stock_decrements(&self, decrements: &[StockDecrement]) -> StoreResult<()> {
        let mut products = self.products_write()?;

        let mut staged: Vec<(ProductId, Product)> = Vec::with_capacity(decrements.len());
        for dec in decrements {
            let row = products
                .get(&dec.product_id)
                .ok_or(StoreError::ProductNotFound(dec.product_id))?;
            ExpectedVersion::Exact(dec.read_version).check(row.version)?;

            let mut product = row.product.clone();
            product.decrement_stock(dec.quantity)?;
            staged.push((dec.product_id, product));
        }

        for (id, product) in staged {
            // Verified above while holding the same write lock.
            if let Some(row) = products.get_mut(&id) {
                row.product = product;
                row.version += 1;
            }
        }
        Ok(())
    }

    /// Return cancelled quantities to stock.
    ///
    /// Products that no longer resolve are skipped; a deleted product must
    /// not fail the cancellation of a historical order.
    pub fn commit_restock(&self, increments: &[(ProductId, u32)]) -> StoreResult<()> {
        let mut products = self.products_write()?;
        for &(id, quantity) in increments {
            if let Some(row) = products.get_mut(&id) {
                row.product.restock(quantity);
                row.version += 1;
            } else {
                tracing::debug!(product_id = %id, quantity, "skipping restock of deleted product");
            }
        }
        Ok(())
    }

    // --- lock plumbing ---

    fn products_read(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<ProductId, ProductRow>>> {
        self.products
            .read()
            .map_err(|_| StoreError::conflict("product store lock poisoned"))
    }

    fn products_write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<ProductId, ProductRow>>> {
        self.products
            .write()
            .map_err(|_| StoreError::conflict("product store lock poisoned"))
    }

    fn categories_read(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<CategoryId, Category>>> {
        self.categories
            .read()
            .map_err(|_| StoreError::conflict("category store lock poisoned"))
    }

    fn categories_write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<CategoryId, Category>>> {
        self.categories
            .write()
            .map_err(|_| StoreError::conflict("category store lock poisoned"))
    }
}
