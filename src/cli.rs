//! Command-line configuration for the `till` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::{logging::LoggingConfig, receipt::DEFAULT_COLUMNS};

/// Check out a fixture cart and print its receipt
#[derive(Debug, Parser)]
#[command(name = "till", about = "Check out a cart and print the receipt", long_about = None)]
pub struct TillArgs {
    /// Directory holding `products/`, `offers/` and `carts/` fixture files
    #[arg(long, env = "TILL_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set to check out
    #[arg(short, long, env = "TILL_SET", default_value = "supermarket")]
    pub set: String,

    /// Receipt width in characters
    #[arg(short, long, env = "TILL_WIDTH", default_value_t = DEFAULT_COLUMNS)]
    pub width: usize,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
