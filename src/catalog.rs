//! Catalog
//!
//! The catalog is the engine's only source of prices. Lookups are pure and
//! synchronous; populating a catalog is construction-time setup.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::products::Product;

/// Errors raised by catalog lookups and setup.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The product was never registered with the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A product's price currency differs from the catalog currency (product, price currency, catalog currency).
    #[error("product {0} is priced in {1}, but the catalog uses {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Maps a product to its unit price.
pub trait Catalog<'a> {
    /// Unit price of the product, if it has been registered.
    fn unit_price(&self, product: &Product) -> Option<Money<'a, Currency>>;

    /// Currency every price in the catalog is quoted in.
    fn currency(&self) -> &'static Currency;

    /// Unit price of the product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if the product has no price.
    fn price_of(&self, product: &Product) -> Result<Money<'a, Currency>, CatalogError> {
        self.unit_price(product)
            .ok_or_else(|| CatalogError::UnknownProduct(product.name().to_string()))
    }
}

/// A catalog held entirely in memory.
#[derive(Debug)]
pub struct InMemoryCatalog<'a> {
    prices: FxHashMap<Product, Money<'a, Currency>>,
    currency: &'static Currency,
}

impl<'a> InMemoryCatalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            prices: FxHashMap::default(),
            currency,
        }
    }

    /// Register a product, replacing any existing price for it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if the price is not in the catalog currency.
    pub fn add_product(
        &mut self,
        product: Product,
        price: Money<'a, Currency>,
    ) -> Result<&mut Self, CatalogError> {
        let price_currency = price.currency();

        if price_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.name().to_string(),
                price_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.prices.insert(product, price);

        Ok(self)
    }

    /// Number of registered products.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<'a> Catalog<'a> for InMemoryCatalog<'a> {
    fn unit_price(&self, product: &Product) -> Option<Money<'a, Currency>> {
        self.prices.get(product).copied()
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }
}
