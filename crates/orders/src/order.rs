use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{Entity, OrderId, ProductId, StoreError, StoreResult, UserId};

use crate::shipping::ShippingInfo;

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    /// A status value outside the enumerated set is rejected at the parse
    /// boundary, before any transition logic runs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::InvalidStatusTransition(s.to_string()))
    }
}

/// One line of an order.
///
/// `price` is a **snapshot** of the product's effective unit price at order
/// creation; later catalog edits must never reach back into it. The product
/// reference is weak: it is resolved through the catalog store, which simply
/// answers "absent" once the product is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Snapshot unit price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

/// Stock side effect a status transition demands from the ledger.
///
/// The domain decides, the ledger applies: instead of hiding restock inside a
/// generic save hook, the transition names its effect up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSideEffect {
    /// Only the status value changes.
    None,
    /// Every line's quantity goes back to its (still resolvable) product.
    RestockItems,
}

/// A durable order with its owned line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user: Option<UserId>,
    shipping: ShippingInfo,
    status: OrderStatus,
    items: Vec<OrderItem>,
    /// Derived from items; recomputed on every status save.
    total_amount: u64,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Materialize a Pending order from already-snapshotted lines.
    pub fn new(
        user: Option<UserId>,
        shipping: ShippingInfo,
        items: Vec<OrderItem>,
    ) -> StoreResult<Self> {
        shipping.validate()?;
        if items.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        for item in &items {
            if item.quantity == 0 {
                return Err(StoreError::validation("item quantity must be at least 1"));
            }
        }

        let mut order = Self {
            id: OrderId::new(),
            user,
            shipping,
            status: OrderStatus::Pending,
            items,
            total_amount: 0,
            created_at: Utc::now(),
        };
        order.recompute_total();
        Ok(order)
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Re-derive `total_amount` from current items.
    ///
    /// Items are immutable after creation in normal operation, so this is
    /// idempotent, but it still runs on every status save so out-of-band item
    /// edits stay consistent.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.items.iter().map(OrderItem::line_total).sum();
    }

    /// Move to `new_status` and report the stock side effect the caller must
    /// apply.
    ///
    /// Entering Cancelled from any other status demands a restock. Cancelled
    /// to Cancelled is a no-op so a double cancel can never restock twice.
    /// Every other transition carries no side effect beyond the status value.
    pub fn transition(&mut self, new_status: OrderStatus) -> StatusSideEffect {
        let effect = match (self.status, new_status) {
            (OrderStatus::Cancelled, OrderStatus::Cancelled) => StatusSideEffect::None,
            (_, OrderStatus::Cancelled) => StatusSideEffect::RestockItems,
            _ => StatusSideEffect::None,
        };
        self.status = new_status;
        self.recompute_total();
        effect
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::PaymentMethod;

    fn test_shipping() -> ShippingInfo {
        ShippingInfo {
            full_name: "Ayesha Khan".to_string(),
            phone: "03001234567".to_string(),
            city: "Lahore".to_string(),
            province: "Punjab".to_string(),
            address: "House 12, Street 4".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }

    fn test_item(price: u64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(),
            price,
            quantity,
        }
    }

    #[test]
    fn new_order_is_pending_with_derived_total() {
        let order = Order::new(
            Some(UserId::new()),
            test_shipping(),
            vec![test_item(10_000, 2), test_item(2_500, 1)],
        )
        .unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total_amount(), 22_500);
        assert_eq!(order.items().len(), 2);
    }

    #[test]
    fn new_order_rejects_empty_items() {
        let err = Order::new(None, test_shipping(), vec![]).unwrap_err();
        assert_eq!(err, StoreError::EmptyCart);
    }

    #[test]
    fn new_order_rejects_zero_quantity_line() {
        let err = Order::new(None, test_shipping(), vec![test_item(100, 0)]).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn new_order_rejects_invalid_shipping() {
        let mut shipping = test_shipping();
        shipping.city = String::new();
        let err = Order::new(None, shipping, vec![test_item(100, 1)]).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        assert_eq!(test_item(10_000, 2).line_total(), 20_000);
        assert_eq!(test_item(1, 1).line_total(), 1);
    }

    #[test]
    fn status_parses_only_the_enumerated_set() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }

        let err = "Refunded".parse::<OrderStatus>().unwrap_err();
        match err {
            StoreError::InvalidStatusTransition(s) => assert_eq!(s, "Refunded"),
            other => panic!("expected InvalidStatusTransition, got {other:?}"),
        }
    }

    #[test]
    fn entering_cancelled_demands_restock_once() {
        let mut order = Order::new(None, test_shipping(), vec![test_item(100, 1)]).unwrap();

        assert_eq!(
            order.transition(OrderStatus::Cancelled),
            StatusSideEffect::RestockItems
        );
        assert_eq!(order.status(), OrderStatus::Cancelled);

        // Second cancel is a pure no-op.
        assert_eq!(
            order.transition(OrderStatus::Cancelled),
            StatusSideEffect::None
        );
    }

    #[test]
    fn forward_transitions_have_no_side_effect() {
        let mut order = Order::new(None, test_shipping(), vec![test_item(100, 1)]).unwrap();

        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            assert_eq!(order.transition(status), StatusSideEffect::None);
            assert_eq!(order.status(), status);
        }
    }

    #[test]
    fn recompute_total_tracks_out_of_band_item_edits() {
        let mut order = Order::new(None, test_shipping(), vec![test_item(100, 2)]).unwrap();
        assert_eq!(order.total_amount(), 200);

        // Transitions re-derive the total even though items normally never
        // change after creation.
        order.items = vec![test_item(50, 1)];
        order.transition(OrderStatus::Confirmed);
        assert_eq!(order.total_amount(), 50);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the order total always equals the sum of line totals.
            #[test]
            fn total_is_sum_of_line_totals(
                lines in proptest::collection::vec((1u64..100_000, 1u32..50), 1..8)
            ) {
                let items: Vec<OrderItem> = lines
                    .iter()
                    .map(|&(price, quantity)| OrderItem {
                        product_id: ProductId::new(),
                        price,
                        quantity,
                    })
                    .collect();
                let expected: u64 = items.iter().map(OrderItem::line_total).sum();

                let order = Order::new(None, test_shipping(), items).unwrap();
                prop_assert_eq!(order.total_amount(), expected);
            }

            /// Property: cancelling twice never reports a second restock.
            #[test]
            fn double_cancel_restocks_at_most_once(
                start in proptest::sample::select(OrderStatus::ALL.to_vec())
            ) {
                let mut order =
                    Order::new(None, test_shipping(), vec![OrderItem {
                        product_id: ProductId::new(),
                        price: 100,
                        quantity: 1,
                    }])
                    .unwrap();
                order.transition(start);

                let first = order.transition(OrderStatus::Cancelled);
                let second = order.transition(OrderStatus::Cancelled);

                if start == OrderStatus::Cancelled {
                    prop_assert_eq!(first, StatusSideEffect::None);
                } else {
                    prop_assert_eq!(first, StatusSideEffect::RestockItems);
                }
                prop_assert_eq!(second, StatusSideEffect::None);
            }
        }
    }
}
