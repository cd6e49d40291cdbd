//! Discounts
//!
//! Discount rules are modelled as a tagged variant over percentage,
//! fixed-amount and tiered formulas, each exposing the same pure
//! `apply(current, original)` function. The pricing engine folds eligible
//! discounts over a running price and stays agnostic to the formula behind
//! each one.

use decimal_percentage::Percentage;
use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{catalog::CatalogError, uuids::uuid_newtype};

uuid_newtype! {
    /// Discount identifier.
    DiscountUuid
}

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely represented.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A pricing rule granted to qualifying customers.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    /// Discount UUID.
    pub uuid: DiscountUuid,

    /// Display name.
    pub name: String,

    /// The formula this discount applies.
    pub rule: DiscountRule,
}

/// The formula a discount applies to a price.
///
/// [`apply`](DiscountRule::apply) takes the current (possibly already
/// reduced) price and the original pre-discount price. Stacked rules never
/// compound: a percentage always comes off the original total, so two 10%
/// discounts reduce the price by 20%, not 19%.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountRule {
    /// Subtract a percentage of the original price.
    PercentOff(Percentage),

    /// Subtract a fixed amount.
    AmountOff(Money<'static, Currency>),

    /// Select the highest tier whose threshold the original price meets and
    /// apply that tier's rule; with no qualifying tier the price is
    /// unchanged.
    TieredThreshold(Vec<DiscountTier>),
}

/// A single tier within a tiered discount.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountTier {
    /// Minimum original price for the tier to qualify.
    pub threshold: Money<'static, Currency>,

    /// Rule applied when this tier is selected.
    pub rule: DiscountRule,
}

impl DiscountRule {
    /// Apply the rule to `current`, with `original` as the pre-discount
    /// reference price. Results floor at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if:
    /// - a percentage calculation cannot be safely represented in minor
    ///   units ([`DiscountError::PercentConversion`]);
    /// - underlying money arithmetic fails, for example on a currency
    ///   mismatch ([`DiscountError::Money`]).
    pub fn apply(
        &self,
        current: Money<'static, Currency>,
        original: Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, DiscountError> {
        match self {
            Self::PercentOff(percent) => {
                let off = percent_of_minor(*percent, original.to_minor_units())?;

                let minor = current
                    .to_minor_units()
                    .checked_sub(off)
                    .ok_or(DiscountError::PercentConversion)?;

                Ok(Money::from_minor(0.max(minor), current.currency()))
            }
            Self::AmountOff(amount) => {
                let reduced = current.sub(*amount)?;

                Ok(Money::from_minor(
                    0.max(reduced.to_minor_units()),
                    current.currency(),
                ))
            }
            Self::TieredThreshold(tiers) => match qualifying_tier(tiers, original)? {
                Some(tier) => tier.rule.apply(current, original),
                None => Ok(current),
            },
        }
    }
}

/// Find the highest tier whose threshold `original` meets.
fn qualifying_tier<'t>(
    tiers: &'t [DiscountTier],
    original: Money<'static, Currency>,
) -> Result<Option<&'t DiscountTier>, DiscountError> {
    let mut best: Option<&DiscountTier> = None;

    for tier in tiers {
        if tier.threshold.currency() != original.currency() {
            return Err(DiscountError::Money(MoneyError::CurrencyMismatch {
                expected: original.currency().iso_alpha_code,
                actual: tier.threshold.currency().iso_alpha_code,
            }));
        }

        if tier.threshold.to_minor_units() > original.to_minor_units() {
            continue;
        }

        if best.is_none_or(|b| tier.threshold.to_minor_units() > b.threshold.to_minor_units()) {
            best = Some(tier);
        }
    }

    Ok(best)
}

/// Calculate the discount amount in minor units for a percentage of `minor`.
fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, DiscountError> {
    let applied = (percent * Decimal::ONE)
        .checked_mul(Decimal::from(minor))
        .ok_or(DiscountError::PercentConversion)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Resolves the discounts a customer currently qualifies for.
#[automock]
pub trait DiscountFinder: Send + Sync {
    /// Order-level discounts eligible for a customer with `completed_orders`
    /// completed orders, in the order they should be applied; ordering is
    /// the implementor's policy and the engine never re-sorts.
    ///
    /// `category` scopes the lookup to a catalog category; order-level
    /// pricing always passes `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the discount catalog cannot be read.
    fn eligible_order_discounts<'a>(
        &self,
        category: Option<&'a str>,
        completed_orders: u64,
    ) -> Result<Vec<Discount>, CatalogError>;
}

/// In-memory discount catalog keyed by completed-order triggers, used by
/// fixtures and tests.
///
/// A discount becomes eligible once the customer has completed at least its
/// trigger count of orders. Results keep registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscountFinder {
    discounts: Vec<(u64, Discount)>,
}

impl InMemoryDiscountFinder {
    /// Create an empty finder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a discount that becomes eligible after `after_orders`
    /// completed orders.
    pub fn insert(&mut self, after_orders: u64, discount: Discount) {
        self.discounts.push((after_orders, discount));
    }
}

impl DiscountFinder for InMemoryDiscountFinder {
    fn eligible_order_discounts(
        &self,
        category: Option<&str>,
        completed_orders: u64,
    ) -> Result<Vec<Discount>, CatalogError> {
        // Only order-level discounts are held here; category-scoped lookups
        // have nothing to return.
        if category.is_some() {
            return Ok(Vec::new());
        }

        Ok(self
            .discounts
            .iter()
            .filter(|(after_orders, _)| *after_orders <= completed_orders)
            .map(|(_, discount)| discount.clone())
            .collect())
    }
}
