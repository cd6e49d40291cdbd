//! Discount Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    discounts::{Discount, DiscountRule, DiscountTier, DiscountUuid},
    fixtures::FixtureError,
    prices::{parse_percentage, parse_price},
};

/// Discount entry in YAML.
///
/// Entries form a list: the declaration order is the order the in-memory
/// finder returns eligible discounts in.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDiscount {
    /// Lookup key
    pub(crate) key: String,

    /// Display name; defaults to the key
    pub(crate) name: Option<String>,

    /// Completed orders required before the discount applies
    #[serde(default)]
    pub(crate) after_orders: u64,

    /// Percentage rule (e.g., "10%")
    pub(crate) percent_off: Option<String>,

    /// Fixed amount rule (e.g., "2.50 EUR")
    pub(crate) amount_off: Option<String>,

    /// Tiered rule
    pub(crate) tiers: Option<Vec<RawTier>>,
}

/// Tier entry in YAML.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTier {
    /// Minimum original price (e.g., "50.00 EUR")
    pub(crate) threshold: String,

    /// Percentage rule for this tier
    pub(crate) percent_off: Option<String>,

    /// Fixed amount rule for this tier
    pub(crate) amount_off: Option<String>,
}

impl RawDiscount {
    /// Convert to a trigger count and a [`Discount`] with a fresh uuid.
    pub(crate) fn into_discount(self) -> Result<(u64, Discount), FixtureError> {
        let rule = rule_from_parts(
            &self.key,
            self.percent_off.as_deref(),
            self.amount_off.as_deref(),
            self.tiers,
        )?;

        let name = self.name.unwrap_or_else(|| self.key.clone());

        Ok((
            self.after_orders,
            Discount {
                uuid: DiscountUuid::new(),
                name,
                rule,
            },
        ))
    }
}

impl RawTier {
    fn into_tier(self, key: &str) -> Result<DiscountTier, FixtureError> {
        let (minor_units, currency) = parse_price(&self.threshold)?;

        let rule = rule_from_parts(
            key,
            self.percent_off.as_deref(),
            self.amount_off.as_deref(),
            None,
        )?;

        Ok(DiscountTier {
            threshold: Money::from_minor(minor_units, currency),
            rule,
        })
    }
}

/// Build a rule from the mutually exclusive YAML fields.
fn rule_from_parts(
    key: &str,
    percent_off: Option<&str>,
    amount_off: Option<&str>,
    tiers: Option<Vec<RawTier>>,
) -> Result<DiscountRule, FixtureError> {
    match (percent_off, amount_off, tiers) {
        (Some(percent), None, None) => Ok(DiscountRule::PercentOff(parse_percentage(percent)?)),
        (None, Some(amount), None) => {
            let (minor_units, currency) = parse_price(amount)?;

            Ok(DiscountRule::AmountOff(Money::from_minor(
                minor_units,
                currency,
            )))
        }
        (None, None, Some(tiers)) => {
            let tiers = tiers
                .into_iter()
                .map(|tier| tier.into_tier(key))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(DiscountRule::TieredThreshold(tiers))
        }
        _ => Err(FixtureError::AmbiguousDiscount(key.to_string())),
    }
}
