//! Fixtures
//!
//! Named pricing scenarios loaded from YAML: a SKU catalog, discount
//! definitions, customer histories, an order and the pricing configuration.
//! Tests and the demo binary build a ready-made engine from a fixture set.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{InMemoryCatalog, Sku, SkuUuid},
    config::{ConfigError, OrderConfiguration, RawConfiguration},
    discounts::{DiscountUuid, InMemoryDiscountFinder},
    history::InMemoryOrderHistory,
    orders::{Order, OrderItem, UserUuid},
    prices::PriceParseError,
    pricing::PriceEngine,
};

mod discounts;
mod orders;
mod skus;

use discounts::RawDiscount;
use orders::{RawOrder, RawUser};
use skus::RawSku;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading a fixture file
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse fixture YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or percentage value
    #[error(transparent)]
    Price(#[from] PriceParseError),

    /// Invalid configuration section
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A discount entry must carry exactly one rule
    #[error("discount {0} must define exactly one of percent_off, amount_off or tiers")]
    AmbiguousDiscount(String),

    /// Unknown SKU key referenced by the fixture
    #[error("sku not found in fixture: {0}")]
    SkuNotFound(String),

    /// Unknown discount key referenced by a lookup
    #[error("discount not found in fixture: {0}")]
    DiscountNotFound(String),

    /// Unknown user referenced by the fixture
    #[error("user not found in fixture: {0}")]
    UserNotFound(String),

    /// The fixture defines no order section
    #[error("fixture defines no order")]
    NoOrder,
}

/// Wrapper for a whole scenario in YAML.
#[derive(Debug, Deserialize)]
struct RawFixture {
    /// Map of SKU key -> SKU fixture
    #[serde(default)]
    skus: FxHashMap<String, RawSku>,

    /// Discount entries; declaration order is application order
    #[serde(default)]
    discounts: Vec<RawDiscount>,

    /// Map of user key -> user fixture
    #[serde(default)]
    users: FxHashMap<String, RawUser>,

    /// The order to price
    order: Option<RawOrder>,

    /// Pricing configuration
    config: Option<RawConfiguration>,
}

/// A named pricing scenario.
#[derive(Debug, Clone)]
pub struct Fixture {
    catalog: InMemoryCatalog,
    discounts: InMemoryDiscountFinder,
    history: InMemoryOrderHistory,
    config: OrderConfiguration,

    /// String key -> generated uuid mappings for lookups
    sku_keys: FxHashMap<String, SkuUuid>,
    discount_keys: FxHashMap<String, DiscountUuid>,
    user_keys: FxHashMap<String, UserUuid>,

    order: Option<RawOrder>,
}

impl Fixture {
    /// Load the named fixture set from `./fixtures/{name}.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let path = PathBuf::from("fixtures").join(format!("{name}.yml"));
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or any price, percentage or
    /// discount entry cannot be converted.
    pub fn from_yaml_str(contents: &str) -> Result<Self, FixtureError> {
        let raw: RawFixture = serde_norway::from_str(contents)?;

        let mut catalog = InMemoryCatalog::new();
        let mut sku_keys = FxHashMap::default();

        for (key, raw_sku) in raw.skus {
            let sku: Sku = raw_sku.try_into()?;

            sku_keys.insert(key, sku.uuid);
            catalog.insert(sku);
        }

        let mut discounts = InMemoryDiscountFinder::new();
        let mut discount_keys = FxHashMap::default();

        for raw_discount in raw.discounts {
            let key = raw_discount.key.clone();
            let (after_orders, discount) = raw_discount.into_discount()?;

            discount_keys.insert(key, discount.uuid);
            discounts.insert(after_orders, discount);
        }

        let mut history = InMemoryOrderHistory::new();
        let mut user_keys = FxHashMap::default();

        for (key, raw_user) in raw.users {
            let user = UserUuid::new();

            history.insert(user, raw_user.completed_orders);
            user_keys.insert(key, user);
        }

        let config = raw
            .config
            .map(OrderConfiguration::try_from)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            catalog,
            discounts,
            history,
            config,
            sku_keys,
            discount_keys,
            user_keys,
            order: raw.order,
        })
    }

    /// The fixture's SKU catalog.
    #[must_use]
    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    /// The fixture's discount finder.
    #[must_use]
    pub fn discounts(&self) -> &InMemoryDiscountFinder {
        &self.discounts
    }

    /// The fixture's order history.
    #[must_use]
    pub fn history(&self) -> &InMemoryOrderHistory {
        &self.history
    }

    /// The fixture's pricing configuration.
    #[must_use]
    pub fn config(&self) -> &OrderConfiguration {
        &self.config
    }

    /// Look up a SKU's generated uuid by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not defined by the fixture.
    pub fn sku(&self, key: &str) -> Result<SkuUuid, FixtureError> {
        self.sku_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::SkuNotFound(key.to_string()))
    }

    /// Look up a discount's generated uuid by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not defined by the fixture.
    pub fn discount(&self, key: &str) -> Result<DiscountUuid, FixtureError> {
        self.discount_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::DiscountNotFound(key.to_string()))
    }

    /// Look up a user's generated uuid by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not defined by the fixture.
    pub fn user(&self, key: &str) -> Result<UserUuid, FixtureError> {
        self.user_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::UserNotFound(key.to_string()))
    }

    /// Build the fixture's order, unpriced.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture has no order section or the order
    /// references unknown keys.
    pub fn order(&self) -> Result<Order, FixtureError> {
        let raw = self.order.as_ref().ok_or(FixtureError::NoOrder)?;

        let user = self.user(&raw.user)?;

        let items = raw
            .items
            .iter()
            .map(|item| Ok(OrderItem::new(self.sku(&item.sku)?, item.quantity)))
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(Order::new(user, items))
    }

    /// Build a price engine over clones of the fixture collaborators.
    #[must_use]
    pub fn engine(
        &self,
    ) -> PriceEngine<InMemoryCatalog, InMemoryDiscountFinder, InMemoryOrderHistory> {
        PriceEngine::new(
            self.catalog.clone(),
            self.discounts.clone(),
            self.history.clone(),
            self.config.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{catalog::SkuResolver as _, discounts::DiscountFinder as _};

    use super::*;

    const SCENARIO: &str = "\
skus:
  espresso-beans:
    name: Espresso Beans 1kg
    price: 10.00 EUR
  paper-filters:
    name: Paper Filters
    price: 5.00 EUR

discounts:
  - key: loyal-10
    name: 10% loyalty discount
    after_orders: 3
    percent_off: 10%

users:
  alice:
    completed_orders: 3
  bob:
    completed_orders: 0

order:
  user: alice
  items:
    - sku: espresso-beans
      quantity: 2
    - sku: paper-filters

config:
  fixed_delivery_fee: 4.00 EUR
";

    #[test]
    fn loads_catalog_with_generated_uuids() -> TestResult {
        let fixture = Fixture::from_yaml_str(SCENARIO)?;

        let beans = fixture.sku("espresso-beans")?;
        let resolved = fixture.catalog().sku(beans)?;

        assert_eq!(resolved.name, "Espresso Beans 1kg");
        assert_eq!(resolved.price, Money::from_minor(1000, EUR));

        Ok(())
    }

    #[test]
    fn loads_discounts_with_triggers() -> TestResult {
        let fixture = Fixture::from_yaml_str(SCENARIO)?;

        let eligible = fixture.discounts().eligible_order_discounts(None, 3)?;
        let loyal = fixture.discount("loyal-10")?;

        assert_eq!(
            eligible.iter().map(|d| d.uuid).collect::<Vec<_>>(),
            vec![loyal]
        );
        assert!(fixture.discounts().eligible_order_discounts(None, 2)?.is_empty());

        Ok(())
    }

    #[test]
    fn builds_the_order_with_default_quantity() -> TestResult {
        let fixture = Fixture::from_yaml_str(SCENARIO)?;

        let order = fixture.order()?;

        assert_eq!(order.user, fixture.user("alice")?);
        assert_eq!(
            order.items.iter().map(|i| i.quantity).collect::<Vec<_>>(),
            vec![2, 1]
        );

        Ok(())
    }

    #[test]
    fn loads_the_configured_fee() -> TestResult {
        let fixture = Fixture::from_yaml_str(SCENARIO)?;

        assert_eq!(
            fixture.config().fixed_delivery_fee(),
            Some(Money::from_minor(400, EUR))
        );

        Ok(())
    }

    #[test]
    fn unknown_keys_are_reported() -> TestResult {
        let fixture = Fixture::from_yaml_str(SCENARIO)?;

        assert!(matches!(
            fixture.sku("oat-milk"),
            Err(FixtureError::SkuNotFound(_))
        ));
        assert!(matches!(
            fixture.user("mallory"),
            Err(FixtureError::UserNotFound(_))
        ));
        assert!(matches!(
            fixture.discount("mystery"),
            Err(FixtureError::DiscountNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn missing_order_section_is_reported() -> TestResult {
        let fixture = Fixture::from_yaml_str("skus: {}\n")?;

        assert!(matches!(fixture.order(), Err(FixtureError::NoOrder)));

        Ok(())
    }

    #[test]
    fn missing_fixture_file_is_an_io_error() {
        let result = Fixture::from_set("no-such-set");

        assert!(
            matches!(result, Err(FixtureError::Io(_))),
            "expected io error, got {result:?}"
        );
    }
}
