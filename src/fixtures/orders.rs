//! Order Fixtures

use serde::Deserialize;

/// User entry in YAML.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawUser {
    /// Completed-order count used for discount eligibility
    #[serde(default)]
    pub(crate) completed_orders: u64,
}

/// Order entry in YAML.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOrder {
    /// User key
    pub(crate) user: String,

    /// Line items, in pricing order
    pub(crate) items: Vec<RawOrderItem>,
}

/// Line-item entry in YAML.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOrderItem {
    /// SKU key
    pub(crate) sku: String,

    /// Quantity; defaults to one
    #[serde(default = "default_quantity")]
    pub(crate) quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
