//! Order Models

use rusty_money::{Money, iso::Currency};

use crate::{catalog::SkuUuid, discounts::{DiscountRule, DiscountUuid}, uuids::uuid_newtype};

uuid_newtype! {
    /// Order identifier.
    OrderUuid
}

uuid_newtype! {
    /// Customer identifier.
    UserUuid
}

/// A customer purchase in progress.
///
/// The order exclusively owns its line-item sequence and its applied-discount
/// records. Pricing mutates the order in place; the priced order is the
/// output.
#[derive(Debug, Clone)]
pub struct Order {
    /// Order UUID.
    pub uuid: OrderUuid,

    /// Customer placing the order.
    pub user: UserUuid,

    /// Line items, in the sequence they are priced.
    pub items: Vec<OrderItem>,

    /// Final computed price; unset until the order has been priced.
    pub price: Option<Money<'static, Currency>>,

    /// Delivery fee recorded on the order when one is configured.
    pub delivery_fee: Option<Money<'static, Currency>>,

    /// Applied-discount records, appended in application order and never
    /// overwritten.
    pub discounts: Vec<OrderDiscount>,
}

impl Order {
    /// Create a new unpriced order for the given customer.
    #[must_use]
    pub fn new(user: UserUuid, items: Vec<OrderItem>) -> Self {
        Self {
            uuid: OrderUuid::new(),
            user,
            items,
            price: None,
            delivery_fee: None,
            discounts: Vec::new(),
        }
    }
}

/// One line in an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// SKU the line references.
    pub sku: SkuUuid,

    /// Number of units ordered; expected to be positive.
    pub quantity: u32,

    /// Running order total observed when this line was priced, not the
    /// line's own subtotal. Unset until the order has been priced.
    pub price: Option<Money<'static, Currency>>,
}

impl OrderItem {
    /// Create a new unpriced line item.
    #[must_use]
    pub fn new(sku: SkuUuid, quantity: u32) -> Self {
        Self {
            sku,
            quantity,
            price: None,
        }
    }
}

/// Record of a discount applied to an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDiscount {
    /// The applied discount.
    pub discount: DiscountUuid,

    /// Snapshot of the discount's rule at application time.
    pub rule: DiscountRule,
}
