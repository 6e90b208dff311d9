//! The order ledger: checkout and order lifecycle against persisted state.
//!
//! `place_order` converts a cart snapshot into a durable order with
//! consistent totals and stock; `set_status` drives the lifecycle and owns
//! the cancellation restock. Both name their full side effects up front;
//! nothing happens inside hidden save hooks.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use shopfront_cart::Cart;
use shopfront_catalog::Product;
use shopfront_core::{OrderId, ProductId, StoreError, StoreResult, UserId};
use shopfront_orders::{Order, OrderItem, OrderStatus, ShippingInfo, StatusSideEffect};

use crate::catalog_store::{CatalogStore, StockDecrement};

/// How many times checkout re-reads and retries after losing a version race
/// before surfacing a retryable `Conflict` to the caller.
const MAX_PLACE_ATTEMPTS: u32 = 5;

/// Staff dashboard aggregates, derived on demand.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Revenue over Delivered orders, smallest currency unit.
    pub total_revenue: u64,
    pub orders_by_status: HashMap<OrderStatus, usize>,
    pub low_stock_products: Vec<Product>,
}

/// Durable order storage plus the checkout/lifecycle operations over it.
#[derive(Debug)]
pub struct OrderLedger {
    catalog: Arc<CatalogStore>,
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl OrderLedger {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self {
            catalog,
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Convert the cart into a Pending order, all-or-nothing.
    ///
    /// Unit prices snapshot each product's `final_price` at this instant;
    /// later catalog edits never reach back into the order. Stock decrements
    /// commit via per-row compare-and-swap: the read phase captures row
    /// versions, the commit verifies them under the store lock and applies
    /// the whole batch or nothing, and a lost race re-reads and retries. The
    /// cart is cleared only after the order is durable.
    pub fn place_order(
        &self,
        cart: &mut Cart,
        shipping: ShippingInfo,
        user: Option<UserId>,
    ) -> StoreResult<Order> {
        if cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        shipping.validate()?;

        for attempt in 1..=MAX_PLACE_ATTEMPTS {
            // Read phase: resolve every line, snapshot prices and versions.
            let mut decrements = Vec::with_capacity(cart.len());
            let mut items = Vec::with_capacity(cart.len());
            for (product_id, quantity) in cart.entries() {
                let (version, product) = self
                    .catalog
                    .product_versioned(product_id)?
                    .ok_or(StoreError::ProductNotFound(product_id))?;
                if !product.can_be_sold() {
                    return Err(StoreError::ProductNotFound(product_id));
                }
                if quantity > product.stock() {
                    return Err(StoreError::insufficient_stock(
                        product_id,
                        quantity,
                        product.stock(),
                    ));
                }
                decrements.push(StockDecrement {
                    product_id,
                    quantity,
                    read_version: version,
                });
                items.push(OrderItem {
                    product_id,
                    price: product.final_price(),
                    quantity,
                });
            }

            // The order is fully built and validated before any store write,
            // so a failure here cannot leave stock partially decremented.
            let order = Order::new(user, shipping.clone(), items)?;

            match self.catalog.commit_stock_decrements(&decrements) {
                Ok(()) => {
                    let mut orders = self.orders_write()?;
                    orders.insert(order.id_typed(), order.clone());
                    drop(orders);

                    cart.clear();
                    tracing::info!(
                        order_id = %order.id_typed(),
                        user = ?user,
                        lines = order.items().len(),
                        total_amount = order.total_amount(),
                        "order placed"
                    );
                    return Ok(order);
                }
                Err(StoreError::Conflict(reason)) if attempt < MAX_PLACE_ATTEMPTS => {
                    tracing::debug!(attempt, %reason, "stock version race, retrying checkout");
                }
                Err(err) => return Err(err),
            }
        }

        Err(StoreError::conflict(
            "checkout lost too many concurrent stock races; retry",
        ))
    }

    /// Transition an order, applying whatever stock side effect the
    /// transition demands.
    ///
    /// Entering Cancelled restores each line's quantity to every still
    /// resolvable product, exactly once; the total is re-derived from items
    /// on every save.
    pub fn set_status(&self, order_id: OrderId, new_status: OrderStatus) -> StoreResult<Order> {
        let mut orders = self.orders_write()?;
        let order = orders.get_mut(&order_id).ok_or(StoreError::NotFound)?;

        let previous = order.status();
        let effect = order.transition(new_status);

        if effect == StatusSideEffect::RestockItems {
            let increments: Vec<(ProductId, u32)> = order
                .items()
                .iter()
                .map(|item| (item.product_id, item.quantity))
                .collect();
            self.catalog.commit_restock(&increments)?;
            tracing::info!(
                order_id = %order_id,
                lines = increments.len(),
                "order cancelled, stock restored"
            );
        }

        tracing::info!(
            order_id = %order_id,
            from = %previous,
            to = %new_status,
            "order status changed"
        );
        Ok(order.clone())
    }

    /// `set_status` for callers holding a raw status string; values outside
    /// the enumerated set fail before any state is touched.
    pub fn set_status_str(&self, order_id: OrderId, new_status: &str) -> StoreResult<Order> {
        self.set_status(order_id, new_status.parse()?)
    }

    // --- queries ---

    pub fn order(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.orders_read()?.get(&order_id).cloned())
    }

    pub fn order_count(&self) -> StoreResult<usize> {
        Ok(self.orders_read()?.len())
    }

    /// A user's orders, newest first.
    pub fn orders_for_user(&self, user: UserId) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders_read()?
            .values()
            .filter(|order| order.user() == Some(user))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }

    /// Sum of totals over Delivered orders.
    pub fn delivered_revenue(&self) -> StoreResult<u64> {
        Ok(self
            .orders_read()?
            .values()
            .filter(|order| order.status() == OrderStatus::Delivered)
            .map(Order::total_amount)
            .sum())
    }

    /// Derive the staff dashboard aggregates.
    pub fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        let orders = self.orders_read()?;

        let mut orders_by_status: HashMap<OrderStatus, usize> =
            OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for order in orders.values() {
            *orders_by_status.entry(order.status()).or_insert(0) += 1;
        }

        let total_revenue = orders
            .values()
            .filter(|order| order.status() == OrderStatus::Delivered)
            .map(Order::total_amount)
            .sum();

        Ok(DashboardStats {
            total_orders: orders.len(),
            total_revenue,
            orders_by_status,
            low_stock_products: self.catalog.low_stock_products()?,
        })
    }

    // --- lock plumbing ---

    fn orders_read(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<OrderId, Order>>> {
        self.orders
            .read()
            .map_err(|_| StoreError::conflict("order store lock poisoned"))
    }

    fn orders_write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<OrderId, Order>>> {
        self.orders
            .write()
            .map_err(|_| StoreError::conflict("order store lock poisoned"))
    }
}
