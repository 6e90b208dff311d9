//! Optimistic concurrency primitives for store rows.

use crate::error::{StoreError, StoreResult};

/// Optimistic concurrency expectation for a versioned store row.
///
/// Rows carry a monotonically increasing version, bumped on every write.
/// Writers capture the version they read, then pass it back as
/// `ExpectedVersion::Exact` so a concurrent interleaving write is detected
/// instead of silently lost.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (useful for idempotent or blind writes).
    Any,
    /// Require the row to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> StoreResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(StoreError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
