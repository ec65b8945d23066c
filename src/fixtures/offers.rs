//! Offer Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{fixtures::FixtureError, offers::OfferKind};

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Offers, at most one per product
    pub offers: Vec<OfferFixture>,
}

/// Offer Fixture
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Product key
    pub product: String,

    /// Offer kind (e.g., `three_for_two`)
    pub kind: String,

    /// Percent or bundle price; omitted for `three_for_two`
    #[serde(default)]
    pub argument: Option<String>,
}

impl OfferFixture {
    /// Parse the offer kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is not recognised.
    pub fn kind(&self) -> Result<OfferKind, FixtureError> {
        Ok(self.kind.parse()?)
    }

    /// Parse the argument, defaulting to zero when omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is not a number.
    pub fn argument(&self) -> Result<Decimal, FixtureError> {
        self.argument
            .as_deref()
            .map_or(Ok(Decimal::ZERO), parse_argument)
    }
}

/// Parse an offer argument such as `20`, `20%` or `0.99`.
///
/// # Errors
///
/// Returns an error if the value is not a number.
pub fn parse_argument(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    number
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidArgument(s.to_string()))
}
