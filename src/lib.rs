//! Till
//!
//! Till is a supermarket checkout engine: it prices a cart against a catalog,
//! applies per-product special offers and renders a fixed-width receipt.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod discounts;
pub mod fixtures;
pub mod logging;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
