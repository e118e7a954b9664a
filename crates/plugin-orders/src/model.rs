//! Order model.

use serde::{Deserialize, Serialize};

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order id.
    pub id: u64,
    /// Human-facing order reference.
    pub reference: String,
    /// Customer name.
    pub customer: String,
    /// Order total in cents.
    pub total_cents: u64,
    /// Order status (`"open"`, `"paid"`, `"shipped"`).
    pub status: String,
}
