//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, stock shortfalls). Every variant is recoverable at the request
/// boundary; none should crash the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Checkout was attempted against a cart with no entries.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line referenced a product that is missing or not purchasable.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A cart line requested more units than are on hand.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A caller supplied a status value outside the enumerated set.
    #[error("invalid order status: {0}")]
    InvalidStatusTransition(String),

    /// A value failed validation (e.g. malformed shipping info, rating out of range).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. stale row version under concurrent writes).
    /// Retryable at the request boundary.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn insufficient_stock(product_id: ProductId, requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            product_id,
            requested,
            available,
        }
    }
}
