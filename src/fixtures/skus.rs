//! SKU Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    catalog::{Sku, SkuUuid},
    fixtures::FixtureError,
    prices::parse_price,
};

/// SKU entry in YAML.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSku {
    /// Display name
    pub(crate) name: String,

    /// Unit price (e.g., "2.99 EUR")
    pub(crate) price: String,
}

impl TryFrom<RawSku> for Sku {
    type Error = FixtureError;

    fn try_from(raw: RawSku) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&raw.price)?;

        Ok(Sku {
            uuid: SkuUuid::new(),
            name: raw.name,
            price: Money::from_minor(minor_units, currency),
        })
    }
}
