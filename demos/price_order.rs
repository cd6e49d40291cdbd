//! Order Pricing Demo
//!
//! Prices the order defined by a fixture set and prints the receipt.
//!
//! Use `-f` to load a fixture set by name from `./fixtures`.
//!
//! Run with: `cargo run --example price_order -- -f standard`

use anyhow::Result;
use clap::Parser;
use tally::{fixtures::Fixture, receipt::Receipt, utils::DemoOrderArgs};

/// Order Pricing Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = DemoOrderArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let engine = fixture.engine();

    let mut order = fixture.order()?;
    engine.compute_price(&mut order)?;

    let receipt = Receipt::from_order(&order)?;

    println!("{}", receipt.table());
    println!();

    for applied in &order.discounts {
        println!("discount applied: {}", applied.discount);
    }

    if let Some(fee) = order.delivery_fee {
        println!("delivery fee:     {fee}");
    }

    println!("subtotal:         {}", receipt.subtotal());
    println!("saved:            {}", receipt.savings()?);
    println!("total:            {}", receipt.total());

    Ok(())
}
