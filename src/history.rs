//! Order history collaborator.
//!
//! Discount eligibility is driven by how many orders a customer has already
//! completed; the count comes from whatever store owns past orders.

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::orders::UserUuid;

/// Order-history lookup errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Underlying order storage failed.
    #[error("order history storage error: {0}")]
    Storage(String),
}

/// Counts a customer's completed orders.
#[automock]
pub trait OrderHistory: Send + Sync {
    /// Number of orders the customer has completed.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] when the order store cannot be read.
    fn completed_order_count(&self, user: UserUuid) -> Result<u64, HistoryError>;
}

/// In-memory completed-order counts, used by fixtures and tests.
///
/// Customers without a recorded count have completed zero orders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderHistory {
    completed: FxHashMap<UserUuid, u64>,
}

impl InMemoryOrderHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a customer's completed-order count.
    pub fn insert(&mut self, user: UserUuid, completed_orders: u64) {
        self.completed.insert(user, completed_orders);
    }
}

impl OrderHistory for InMemoryOrderHistory {
    fn completed_order_count(&self, user: UserUuid) -> Result<u64, HistoryError> {
        Ok(self.completed.get(&user).copied().unwrap_or(0))
    }
}
