//! Receipt
//!
//! Read-only summary of a priced order, with a table rendering for
//! terminal output.

use decimal_percentage::Percentage;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{Table, builder::Builder, settings::Style};
use thiserror::Error;

use crate::orders::Order;

/// Errors building a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The order, or one of its lines, has not been priced yet.
    #[error("order has not been priced")]
    Unpriced,
}

/// Summary of a priced order.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    subtotal: Money<'static, Currency>,
    delivery_fee: Option<Money<'static, Currency>>,
    total: Money<'static, Currency>,
}

/// One rendered line of a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    /// SKU reference.
    pub sku: String,

    /// Units ordered.
    pub quantity: u32,

    /// Running order total as of this line.
    pub running_total: String,
}

impl Receipt {
    /// Build a receipt from a priced order.
    ///
    /// The raw item subtotal is read from the last line's price field, which
    /// carries the running order total after every line was priced.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Unpriced`] if the order or any of its lines
    /// has no price yet.
    pub fn from_order(order: &Order) -> Result<Self, ReceiptError> {
        let total = order.price.ok_or(ReceiptError::Unpriced)?;

        let subtotal = order
            .items
            .last()
            .and_then(|item| item.price)
            .ok_or(ReceiptError::Unpriced)?;

        let lines = order
            .items
            .iter()
            .map(|item| {
                let running_total = item.price.ok_or(ReceiptError::Unpriced)?;

                Ok(ReceiptLine {
                    sku: item.sku.to_string(),
                    quantity: item.quantity,
                    running_total: running_total.to_string(),
                })
            })
            .collect::<Result<Vec<_>, ReceiptError>>()?;

        Ok(Self {
            lines,
            subtotal,
            delivery_fee: order.delivery_fee,
            total,
        })
    }

    /// The rendered receipt lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Raw item subtotal before discounts and delivery fee.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Delivery fee recorded on the order, when one was configured.
    #[must_use]
    pub fn delivery_fee(&self) -> Option<Money<'static, Currency>> {
        self.delivery_fee
    }

    /// Final amount payable.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Amount saved by applied discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the arithmetic fails.
    pub fn savings(&self) -> Result<Money<'static, Currency>, MoneyError> {
        let undiscounted = match self.delivery_fee {
            Some(fee) => self.subtotal.add(fee)?,
            None => self.subtotal,
        };

        undiscounted.sub(self.total)
    }

    /// Savings as a share of the raw item subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the savings calculation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings = self.savings()?;

        // Percent savings is relative to the pre-discount item subtotal.
        // Avoid integer division truncation by doing the ratio in decimal
        // space.
        let savings_minor = savings.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / subtotal_dec))
    }

    /// Render the line items as a table.
    #[must_use]
    pub fn table(&self) -> Table {
        let mut builder = Builder::default();

        builder.push_record(["SKU", "Qty", "Running total"]);

        for line in &self.lines {
            builder.push_record([
                line.sku.clone(),
                line.quantity.to_string(),
                line.running_total.clone(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());

        table
    }
}
