//! Order domain module.
//!
//! Orders, their owned line items, the status lifecycle, and checkout-time
//! shipping details. Pure domain logic: decisions (which side effect a
//! transition demands) are made here, applied by the ledger.

pub mod order;
pub mod shipping;

pub use order::{Order, OrderItem, OrderStatus, StatusSideEffect};
pub use shipping::{PaymentMethod, ShippingInfo};
