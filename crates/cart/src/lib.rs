//! Session cart domain module.
//!
//! A cart is a transient, session-scoped product → quantity map. It is never
//! persisted durably; the order ledger consumes it at checkout.

pub mod cart;
pub mod session;

pub use cart::Cart;
pub use session::SessionCarts;
