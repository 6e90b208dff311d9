use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{CategoryId, Entity, ProductId, StoreError, StoreResult};

use crate::slug::slugify;

/// Products with fewer units than this on hand are flagged low-stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Fields supplied when registering a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub discount_price: Option<u64>,
    pub stock: u32,
    pub category: Option<CategoryId>,
}

/// A catalog product.
///
/// Pricing facts (`final_price`, `discount_percentage`) and the low-stock
/// flag are derived from current field values on every call; nothing here is
/// cached. Stock mutation goes through [`Product::decrement_stock`] and
/// [`Product::restock`] so the non-negative invariant holds everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    /// Auto-generated unique SKU, e.g. `PRD-9F3A1`.
    code: String,
    slug: String,
    name: String,
    description: String,
    /// Price in smallest currency unit (e.g., cents).
    price: u64,
    discount_price: Option<u64>,
    stock: u32,
    is_active: bool,
    category: Option<CategoryId>,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn create(new: NewProduct) -> StoreResult<Self> {
        if new.name.trim().is_empty() {
            return Err(StoreError::validation("product name cannot be empty"));
        }
        if new.price == 0 {
            return Err(StoreError::validation("price must be positive"));
        }
        if let Some(discount) = new.discount_price {
            if discount == 0 {
                return Err(StoreError::validation(
                    "discount_price must be positive when present",
                ));
            }
        }

        let id = ProductId::new();
        let slug = slugify(&new.name);
        if slug.is_empty() {
            return Err(StoreError::validation(
                "product name does not yield a usable slug",
            ));
        }

        Ok(Self {
            id,
            code: generate_code(id),
            slug,
            name: new.name,
            description: new.description,
            price: new.price,
            discount_price: new.discount_price,
            stock: new.stock,
            is_active: true,
            category: new.category,
            created_at: Utc::now(),
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn discount_price(&self) -> Option<u64> {
        self.discount_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Effective unit price after the discount rule.
    ///
    /// The discount applies only when `0 < discount_price < price`; otherwise
    /// the list price stands.
    pub fn final_price(&self) -> u64 {
        match self.discount_price {
            Some(discount) if discount > 0 && discount < self.price => discount,
            _ => self.price,
        }
    }

    /// Integer percentage knocked off the list price; 0 when no discount is
    /// in effect.
    pub fn discount_percentage(&self) -> u64 {
        match self.discount_price {
            Some(discount) if discount > 0 && discount < self.price => {
                (self.price - discount) * 100 / self.price
            }
            _ => 0,
        }
    }

    /// Read-only threshold check: fewer than [`LOW_STOCK_THRESHOLD`] on hand.
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Check if the product can be put in an order.
    pub fn can_be_sold(&self) -> bool {
        self.is_active
    }

    /// Remove `quantity` units from stock.
    ///
    /// Rejects the whole decrement when fewer units are on hand; stock never
    /// goes negative.
    pub fn decrement_stock(&mut self, quantity: u32) -> StoreResult<()> {
        if quantity > self.stock {
            return Err(StoreError::insufficient_stock(
                self.id, quantity, self.stock,
            ));
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Return `quantity` units to stock (cancellation restock, deliveries).
    pub fn restock(&mut self, quantity: u32) {
        self.stock = self.stock.saturating_add(quantity);
    }

    pub fn set_price(&mut self, price: u64) -> StoreResult<()> {
        if price == 0 {
            return Err(StoreError::validation("price must be positive"));
        }
        self.price = price;
        Ok(())
    }

    pub fn set_discount_price(&mut self, discount_price: Option<u64>) -> StoreResult<()> {
        if discount_price == Some(0) {
            return Err(StoreError::validation(
                "discount_price must be positive when present",
            ));
        }
        self.discount_price = discount_price;
        Ok(())
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Reassign (or clear) the category. Category deletion clears this via
    /// the catalog store, so the reference never dangles.
    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Unique SKU derived from the product id: `PRD-` plus the last five hex
/// digits of the uuid, uppercased (the tail carries the random bits of a v7).
fn generate_code(id: ProductId) -> String {
    let hex = id.as_uuid().simple().to_string();
    format!("PRD-{}", hex[hex.len() - 5..].to_uppercase())
}
