//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines in scan order; repeated products are merged
    pub lines: Vec<CartLineFixture>,
}

/// Cart Line Fixture
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product key
    pub product: String,

    /// Quantity (e.g., "2.5"); one unit when omitted
    #[serde(default)]
    pub quantity: Option<String>,
}
