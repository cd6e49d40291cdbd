//! Utils

use clap::Parser;

/// Arguments for the order pricing demo
#[derive(Debug, Parser)]
pub struct DemoOrderArgs {
    /// Fixture set to use for the catalog, discounts, history and order
    #[clap(short, long, default_value = "standard")]
    pub fixture: String,
}
