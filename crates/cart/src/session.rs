use std::collections::HashMap;
use std::sync::RwLock;

use shopfront_core::{SessionId, StoreError, StoreResult};

use crate::cart::Cart;

/// In-memory registry of per-session carts.
///
/// This makes the "cart in session storage" state explicit: a keyed mutable
/// map, handed by reference into checkout, with nothing hidden in globals.
/// Ending a session drops its cart wholesale.
#[derive(Debug, Default)]
pub struct SessionCarts {
    carts: RwLock<HashMap<SessionId, Cart>>,
}

impl SessionCarts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the session's cart, creating an empty cart for new
    /// sessions.
    pub fn with_cart<R>(
        &self,
        session_id: SessionId,
        f: impl FnOnce(&mut Cart) -> R,
    ) -> StoreResult<R> {
        let mut carts = self
            .carts
            .write()
            .map_err(|_| StoreError::conflict("cart registry lock poisoned"))?;
        Ok(f(carts.entry(session_id).or_default()))
    }

    /// Snapshot the session's cart (empty for unknown sessions).
    pub fn snapshot(&self, session_id: SessionId) -> StoreResult<Cart> {
        let carts = self
            .carts
            .read()
            .map_err(|_| StoreError::conflict("cart registry lock poisoned"))?;
        Ok(carts.get(&session_id).cloned().unwrap_or_default())
    }

    /// Drop the session's cart (session ended or expired).
    pub fn end_session(&self, session_id: SessionId) -> StoreResult<()> {
        let mut carts = self
            .carts
            .write()
            .map_err(|_| StoreError::conflict("cart registry lock poisoned"))?;
        carts.remove(&session_id);
        Ok(())
    }
}
