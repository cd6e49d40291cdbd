//! Order configuration.

use std::{fs, path::Path};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::prices::{PriceParseError, parse_price};

/// Errors loading order configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price value.
    #[error(transparent)]
    Price(#[from] PriceParseError),
}

/// Read-only pricing configuration, resolved once per pricing run.
#[derive(Debug, Clone, Default)]
pub struct OrderConfiguration {
    fixed_delivery_fee: Option<Money<'static, Currency>>,
}

impl OrderConfiguration {
    /// Configuration with a fixed per-order delivery fee.
    #[must_use]
    pub fn with_fixed_delivery_fee(fee: Money<'static, Currency>) -> Self {
        Self {
            fixed_delivery_fee: Some(fee),
        }
    }

    /// The fixed per-order delivery fee, when one is configured.
    #[must_use]
    pub fn fixed_delivery_fee(&self) -> Option<Money<'static, Currency>> {
        self.fixed_delivery_fee
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML or the fee price string is
    /// invalid.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfiguration = serde_norway::from_str(contents)?;

        raw.try_into()
    }
}

/// Wrapper for configuration in YAML.
#[derive(Debug, Deserialize)]
pub(crate) struct RawConfiguration {
    /// Delivery fee (e.g., "4.00 EUR"); omit for no fee.
    pub(crate) fixed_delivery_fee: Option<String>,
}

impl TryFrom<RawConfiguration> for OrderConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        let fixed_delivery_fee = raw
            .fixed_delivery_fee
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor, currency)| Money::from_minor(minor, currency));

        Ok(Self { fixed_delivery_fee })
    }
}
