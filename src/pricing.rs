//! Price Engine
//!
//! Computes an order's price and updates the order's fields in place: every
//! line's price field, the applied-discount records, the delivery fee and
//! the final total.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CatalogError, SkuResolver},
    config::OrderConfiguration,
    discounts::{DiscountError, DiscountFinder},
    history::{HistoryError, OrderHistory},
    orders::{Order, OrderDiscount},
};

/// Errors surfaced by the pricing engine.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The order has no items; pricing is refused outright.
    #[error("order has no items")]
    EmptyOrder,

    /// A line total overflowed the representable money range.
    #[error("line total out of range")]
    LineOverflow,

    /// SKU resolution failed; surfaced unchanged from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Order-history lookup failed.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// A discount formula failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Order price engine.
///
/// Prices an order from its line items, applies the discounts the customer
/// qualifies for, adds the configured delivery fee and writes the result
/// back onto the order. The engine persists nothing and runs inside
/// whatever transactional scope the caller manages; a failure part-way
/// leaves already-written fields in place for that scope to roll back.
#[derive(Debug, Clone)]
pub struct PriceEngine<C, D, H> {
    catalog: C,
    discounts: D,
    history: H,
    config: OrderConfiguration,
}

impl<C, D, H> PriceEngine<C, D, H>
where
    C: SkuResolver,
    D: DiscountFinder,
    H: OrderHistory,
{
    /// Create an engine over the given collaborators and configuration.
    #[must_use]
    pub fn new(catalog: C, discounts: D, history: H, config: OrderConfiguration) -> Self {
        Self {
            catalog,
            discounts,
            history,
            config,
        }
    }

    /// Price the order in place.
    ///
    /// Pricing always recomputes from scratch; nothing is incrementally
    /// patched, so re-running with stable collaborators reproduces the same
    /// price. Applied-discount records are appended, never overwritten.
    ///
    /// # Errors
    ///
    /// - [`PricingError::EmptyOrder`] when the item list is empty; no field
    ///   is mutated.
    /// - [`PricingError::Catalog`] when a line references an unknown SKU,
    ///   before any delivery-fee or discount logic runs.
    /// - Collaborator and money arithmetic failures, surfaced unchanged.
    #[tracing::instrument(
        skip(self, order),
        fields(
            order = %order.uuid,
            items = order.items.len(),
            price_minor = tracing::field::Empty,
        )
    )]
    pub fn compute_price(&self, order: &mut Order) -> Result<(), PricingError> {
        if order.items.is_empty() {
            return Err(PricingError::EmptyOrder);
        }

        let mut price: Option<Money<'static, Currency>> = None;

        for item in &mut order.items {
            let sku = self.catalog.sku(item.sku)?;

            let line_minor = sku
                .price
                .to_minor_units()
                .checked_mul(i64::from(item.quantity))
                .ok_or(PricingError::LineOverflow)?;

            let line = Money::from_minor(line_minor, sku.price.currency());

            let total = match price {
                Some(accumulated) => accumulated.add(line)?,
                None => line,
            };

            // The line's price field carries the running order total as of
            // this line, not the line's own subtotal; downstream consumers
            // read the cumulative value.
            item.price = Some(total);
            price = Some(total);
        }

        let subtotal = price.ok_or(PricingError::EmptyOrder)?;

        let fixed_delivery_fee = self.config.fixed_delivery_fee();

        let mut total = self.apply_eligible_discounts(order, subtotal)?;

        if let Some(fee) = fixed_delivery_fee {
            total = total.add(fee)?;
            order.delivery_fee = Some(fee);
        }

        order.price = Some(total);

        tracing::Span::current().record("price_minor", total.to_minor_units());

        Ok(())
    }

    /// Fold the customer's eligible discounts over `price`, appending one
    /// application record per discount, in the order the finder returned
    /// them.
    ///
    /// Discounts stack: each rule sees the current, possibly already
    /// reduced, price together with the original pre-discount price. An
    /// empty eligibility result leaves both the price and the order's
    /// discount records untouched.
    fn apply_eligible_discounts(
        &self,
        order: &mut Order,
        price: Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, PricingError> {
        let original = price;

        let completed_orders = self.history.completed_order_count(order.user)?;

        let eligible = self
            .discounts
            .eligible_order_discounts(None, completed_orders)?;

        if eligible.is_empty() {
            return Ok(price);
        }

        debug!(
            completed_orders,
            count = eligible.len(),
            "applying eligible discounts"
        );

        let mut price = price;

        for discount in eligible {
            price = discount.rule.apply(price, original)?;

            order.discounts.push(OrderDiscount {
                discount: discount.uuid,
                rule: discount.rule,
            });
        }

        Ok(price)
    }
}
