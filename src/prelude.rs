//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{CatalogError, InMemoryCatalog, Sku, SkuResolver, SkuUuid},
    config::{ConfigError, OrderConfiguration},
    discounts::{
        Discount, DiscountError, DiscountFinder, DiscountRule, DiscountTier, DiscountUuid,
        InMemoryDiscountFinder,
    },
    fixtures::{Fixture, FixtureError},
    history::{HistoryError, InMemoryOrderHistory, OrderHistory},
    orders::{Order, OrderDiscount, OrderItem, OrderUuid, UserUuid},
    prices::{PriceParseError, parse_percentage, parse_price},
    pricing::{PriceEngine, PricingError},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
