//! End-to-end pricing scenarios driven by the fixture sets in `./fixtures`.
//!
//! The `standard` set prices the canonical checkout:
//!
//! 1. Espresso Beans 1kg at €10.00, quantity 2  -> running total €20.00
//! 2. Paper Filters at €5.00, quantity 1        -> running total €25.00
//!
//! Alice has completed 3 orders, which makes the 10% loyalty discount
//! eligible: €25.00 - €2.50 = €22.50. The configured €4.00 delivery fee
//! brings the final price to €26.50.
//!
//! The `stacked` set checks that two eligible discounts apply in declaration
//! order and each computes off the original total: €40.00 - 5% (€2.00)
//! - €2.00 = €36.00, with no delivery fee configured.
//!
//! The `tiered` set checks highest-qualifying-tier selection: a €90.00
//! order meets both the €50.00 and €80.00 thresholds, so the 12% tier wins:
//! €90.00 - €10.80 + €4.00 fee = €83.20.

use rusty_money::{Money, iso::EUR};
use testresult::TestResult;

use tally::{
    catalog::{CatalogError, SkuUuid},
    fixtures::Fixture,
    orders::{Order, OrderItem},
    pricing::PricingError,
    receipt::Receipt,
};

#[test]
fn standard_scenario_prices_to_26_50() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let engine = fixture.engine();

    let mut order = fixture.order()?;
    engine.compute_price(&mut order)?;

    assert_eq!(order.price, Some(Money::from_minor(2650, EUR)));
    assert_eq!(order.delivery_fee, Some(Money::from_minor(400, EUR)));

    // Line price fields hold running totals, not line subtotals.
    let line_prices: Vec<_> = order.items.iter().map(|item| item.price).collect();

    assert_eq!(
        line_prices,
        vec![
            Some(Money::from_minor(2000, EUR)),
            Some(Money::from_minor(2500, EUR)),
        ]
    );

    // Exactly one record, for the loyalty discount.
    assert_eq!(
        order.discounts.iter().map(|d| d.discount).collect::<Vec<_>>(),
        vec![fixture.discount("loyal-10")?]
    );

    Ok(())
}

#[test]
fn standard_scenario_receipt_summarises_the_order() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let engine = fixture.engine();

    let mut order = fixture.order()?;
    engine.compute_price(&mut order)?;

    let receipt = Receipt::from_order(&order)?;

    assert_eq!(receipt.subtotal(), Money::from_minor(2500, EUR));
    assert_eq!(receipt.total(), Money::from_minor(2650, EUR));
    assert_eq!(receipt.savings()?, Money::from_minor(250, EUR));

    Ok(())
}

#[test]
fn new_customer_gets_no_discounts() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let engine = fixture.engine();

    // Bob has no completed orders, so nothing is eligible.
    let mut order = Order::new(
        fixture.user("bob")?,
        vec![OrderItem::new(fixture.sku("espresso-beans")?, 1)],
    );

    engine.compute_price(&mut order)?;

    assert!(order.discounts.is_empty());
    assert_eq!(order.price, Some(Money::from_minor(1400, EUR)));
    assert_eq!(order.delivery_fee, Some(Money::from_minor(400, EUR)));

    Ok(())
}

#[test]
fn stacked_discounts_apply_in_declaration_order() -> TestResult {
    let fixture = Fixture::from_set("stacked")?;
    let engine = fixture.engine();

    let mut order = fixture.order()?;
    engine.compute_price(&mut order)?;

    assert_eq!(order.price, Some(Money::from_minor(3600, EUR)));
    assert!(order.delivery_fee.is_none());

    assert_eq!(
        order.discounts.iter().map(|d| d.discount).collect::<Vec<_>>(),
        vec![
            fixture.discount("returning-5")?,
            fixture.discount("two-euros-off")?,
        ]
    );

    Ok(())
}

#[test]
fn tiered_discount_selects_the_highest_qualifying_tier() -> TestResult {
    let fixture = Fixture::from_set("tiered")?;
    let engine = fixture.engine();

    let mut order = fixture.order()?;
    engine.compute_price(&mut order)?;

    assert_eq!(order.price, Some(Money::from_minor(8320, EUR)));

    Ok(())
}

#[test]
fn unknown_sku_fails_before_fee_and_discount_logic() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let engine = fixture.engine();

    let mut order = Order::new(
        fixture.user("alice")?,
        vec![OrderItem::new(SkuUuid::new(), 1)],
    );

    let result = engine.compute_price(&mut order);

    assert!(
        matches!(
            result,
            Err(PricingError::Catalog(CatalogError::SkuNotFound(_)))
        ),
        "expected SkuNotFound, got {result:?}"
    );
    assert!(order.price.is_none());
    assert!(order.delivery_fee.is_none());
    assert!(order.discounts.is_empty());

    Ok(())
}

#[test]
fn empty_order_is_refused() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let engine = fixture.engine();

    let mut order = Order::new(fixture.user("alice")?, Vec::new());

    let result = engine.compute_price(&mut order);

    assert!(
        matches!(result, Err(PricingError::EmptyOrder)),
        "expected EmptyOrder, got {result:?}"
    );

    Ok(())
}

#[test]
fn repricing_the_same_order_reproduces_the_price() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let engine = fixture.engine();

    let mut order = fixture.order()?;

    engine.compute_price(&mut order)?;
    let first_price = order.price;

    engine.compute_price(&mut order)?;

    assert_eq!(order.price, first_price);

    Ok(())
}
