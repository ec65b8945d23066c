//! Fixtures
//!
//! Loads a catalog, offers and a cart from YAML files laid out as
//! `<base>/products/<set>.yml`, `<base>/offers/<set>.yml` and
//! `<base>/carts/<set>.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    catalog::{CatalogError, InMemoryCatalog},
    fixtures::{carts::CartFixture, offers::OffersFixture, products::ProductsFixture},
    offers::{Offer, OfferError, Offers},
    products::Product,
};

pub mod carts;
pub mod offers;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid offer argument
    #[error("Invalid offer argument: {0}")]
    InvalidArgument(String),

    /// Invalid quantity format
    #[error("Invalid quantity format: {0}")]
    InvalidQuantity(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Offer configuration error
    #[error(transparent)]
    Offer(#[from] OfferError),

    /// Catalog setup error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart filling error
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog, created once the first product fixes the currency
    catalog: Option<InMemoryCatalog<'a>>,

    /// String key -> product lookups
    products: FxHashMap<String, Product>,

    /// Offers in force
    offers: Offers,

    /// Cart built from the cart fixture
    cart: Cart,
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            products: FxHashMap::default(),
            offers: Offers::new(),
            cart: Cart::new(),
        }
    }

    fn read(&self, dir: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(dir).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "loading fixture");

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load products from a YAML fixture file into the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = serde_norway::from_str(&self.read("products", name)?)?;

        for (key, product_fixture) in fixture.products {
            let (product, price) = product_fixture.try_into_priced()?;

            let catalog = self
                .catalog
                .get_or_insert_with(|| InMemoryCatalog::new(price.currency()));

            catalog.add_product(product.clone(), price)?;
            self.products.insert(key, product);
        }

        Ok(self)
    }

    /// Load offers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or references unknown products or offer kinds.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: OffersFixture = serde_norway::from_str(&self.read("offers", name)?)?;

        for offer_fixture in fixture.offers {
            let product = self.product(&offer_fixture.product)?.clone();
            let offer = Offer::new(offer_fixture.kind()?, product, offer_fixture.argument()?);

            self.offers.insert(offer);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, references unknown products,
    /// or has a quantity that is not a positive number.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = serde_norway::from_str(&self.read("carts", name)?)?;

        for line in fixture.lines {
            let product = self.product(&line.product)?.clone();

            match line.quantity.as_deref() {
                None => {
                    self.cart.add(&product);
                }
                Some(raw) => {
                    let quantity = raw
                        .trim()
                        .parse::<Decimal>()
                        .map_err(|_err| FixtureError::InvalidQuantity(raw.to_string()))?;

                    self.cart.add_quantity(&product, quantity)?;
                }
            }
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, offers, and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_at("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_at(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_offers(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded.
    pub fn catalog(&self) -> Result<&InMemoryCatalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get all offers
    pub fn offers(&self) -> &Offers {
        &self.offers
    }

    /// Get the cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::{Money, iso::GBP};
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::{catalog::Catalog, offers::OfferKind};

    use super::*;

    fn write(dir: &TempDir, sub: &str, contents: &str) -> TestResult {
        fs::create_dir_all(dir.path().join(sub))?;
        fs::write(dir.path().join(sub).join("test.yml"), contents)?;

        Ok(())
    }

    const PRODUCTS: &str = "
products:
  brush:
    name: toothbrush
    price: 0.99 GBP
  apples:
    name: apples
    unit: weight
    price: 1.99 GBP
";

    #[test]
    fn loads_products_offers_and_cart() -> TestResult {
        let dir = TempDir::new()?;

        write(&dir, "products", PRODUCTS)?;
        write(
            &dir,
            "offers",
            "
offers:
  - product: brush
    kind: three_for_two
  - product: apples
    kind: ten_percent_discount
    argument: 20%
",
        )?;
        write(
            &dir,
            "carts",
            "
lines:
  - product: brush
  - product: apples
    quantity: \"2.5\"
  - product: brush
",
        )?;

        let fixture = Fixture::from_set_at(dir.path(), "test")?;
        let catalog = fixture.catalog()?;
        let brush = fixture.product("brush")?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.price_of(brush)?, Money::from_minor(99, GBP));
        assert_eq!(
            fixture.offers().get(brush).map(|o| o.kind),
            Some(OfferKind::ThreeForTwo)
        );
        assert_eq!(fixture.cart().quantity_of(brush), Some(Decimal::TWO));
        assert_eq!(
            fixture.cart().quantity_of(fixture.product("apples")?),
            Some(Decimal::new(25, 1))
        );

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Fixture::with_base_path("./does-not-exist")
            .load_products("nope")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn offer_for_unknown_product_errors() -> TestResult {
        let dir = TempDir::new()?;

        write(&dir, "products", PRODUCTS)?;
        write(
            &dir,
            "offers",
            "
offers:
  - product: caviar
    kind: three_for_two
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("test")?;

        let result = fixture.load_offers("test").map(|_| ());

        assert!(matches!(result, Err(FixtureError::ProductNotFound(key)) if key == "caviar"));

        Ok(())
    }

    #[test]
    fn unsupported_offer_kind_errors() -> TestResult {
        let dir = TempDir::new()?;

        write(&dir, "products", PRODUCTS)?;
        write(
            &dir,
            "offers",
            "
offers:
  - product: brush
    kind: buy_one_get_one
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("test")?;

        let result = fixture.load_offers("test").map(|_| ());

        assert!(matches!(
            result,
            Err(FixtureError::Offer(OfferError::UnsupportedOfferKind(_)))
        ));

        Ok(())
    }

    #[test]
    fn non_positive_quantity_is_cart_error() -> TestResult {
        let dir = TempDir::new()?;

        write(&dir, "products", PRODUCTS)?;
        write(
            &dir,
            "carts",
            "
lines:
  - product: apples
    quantity: \"0\"
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("test")?;

        let result = fixture.load_cart("test").map(|_| ());

        assert!(matches!(
            result,
            Err(FixtureError::Cart(CartError::InvalidQuantity(_)))
        ));

        Ok(())
    }

    #[test]
    fn mixed_currency_products_error() -> TestResult {
        let dir = TempDir::new()?;

        write(
            &dir,
            "products",
            "
products:
  brush:
    name: toothbrush
    price: 0.99 GBP
  floss:
    name: floss
    price: 1.50 USD
",
        )?;

        let result = Fixture::with_base_path(dir.path())
            .load_products("test")
            .map(|_| ());

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(..)))
        ));

        Ok(())
    }

    #[test]
    fn catalog_before_products_errors() {
        assert!(matches!(
            Fixture::new().catalog(),
            Err(FixtureError::NoCurrency)
        ));
    }
}
