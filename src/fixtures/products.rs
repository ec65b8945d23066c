//! Product Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::{major_to_minor, round_minor},
    products::{Product, Unit},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Unit as written in YAML
#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFixture {
    /// Sold by count
    Each,

    /// Sold by weight
    Weight,
}

impl From<UnitFixture> for Unit {
    fn from(unit: UnitFixture) -> Self {
        match unit {
            UnitFixture::Each => Unit::Each,
            UnitFixture::Weight => Unit::Weight,
        }
    }
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// How the product is measured
    #[serde(default = "default_unit")]
    pub unit: UnitFixture,

    /// Unit price (e.g., "0.99 GBP")
    pub price: String,
}

fn default_unit() -> UnitFixture {
    UnitFixture::Each
}

impl ProductFixture {
    /// Build the product and its catalog price.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_priced(self) -> Result<(Product, Money<'static, Currency>), FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;

        Ok((
            Product::new(self.name, self.unit.into()),
            Money::from_minor(minor_units, currency),
        ))
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let major = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = major_to_minor(major)
        .and_then(round_minor)
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
