//! Till binary
//!
//! Loads a fixture set, checks out its cart and prints the receipt.
//!
//! Use `--set` to choose the fixture set and `--width` to change the receipt width.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use till::{
    checkout::checkout, cli::TillArgs, fixtures::Fixture, logging::init_subscriber,
    receipt::ReceiptPrinter,
};

fn main() -> Result<()> {
    let args = TillArgs::parse();

    init_subscriber(&args.logging)?;

    info!(set = %args.set, fixtures = %args.fixtures.display(), "loading fixture set");

    let fixture = Fixture::from_set_at(&args.fixtures, &args.set)?;
    let receipt = checkout(fixture.cart(), fixture.offers(), fixture.catalog()?)?;

    let stdout = io::stdout();
    let handle = stdout.lock();

    ReceiptPrinter::new(args.width).write_to(handle, &receipt)?;

    Ok(())
}
