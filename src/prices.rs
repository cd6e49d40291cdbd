//! Price and percentage string parsing, shared by configuration and fixtures.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

/// Errors parsing price or percentage strings.
#[derive(Debug, Error)]
pub enum PriceParseError {
    /// Invalid price format.
    #[error("invalid price, expected \"AMOUNT CURRENCY\": {0}")]
    InvalidPrice(String),

    /// Unknown currency code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid percentage format.
    #[error("invalid percentage: {0}")]
    InvalidPercentage(String),
}

/// Parse a price string (e.g., "2.99 EUR") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code is
/// not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceParseError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceParseError::InvalidPrice(s.to_string()));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceParseError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceParseError::InvalidPrice(s.to_string()))?;

    let currency = match code {
        "EUR" => EUR,
        "GBP" => GBP,
        "USD" => USD,
        other => return Err(PriceParseError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse a percentage string (e.g., "15%" or "0.15") into a [`Percentage`].
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a number.
pub fn parse_percentage(s: &str) -> Result<Percentage, PriceParseError> {
    let trimmed = s.trim();

    if let Some(percent) = trimmed.strip_suffix('%') {
        let value = percent
            .trim()
            .parse::<f64>()
            .map_err(|_err| PriceParseError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / 100.0))
    } else {
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| PriceParseError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
