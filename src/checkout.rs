//! Checkout
//!
//! Prices a cart against a catalog, applies offers and produces a [`Receipt`].
//! Nothing is returned unless every line could be priced.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError},
    discounts::{DiscountEngine, DiscountError},
    offers::{Offer, Offers},
    pricing::{PricingError, line_total},
    receipt::{PricedLineItem, Receipt},
};

/// Errors that abort a checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// A product in the cart has no catalog price.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Discount calculation failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Line or receipt totals could not be represented.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A price is not in the catalog currency (catalog currency, price currency).
    #[error("catalog currency is {0}, but a price is in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Check out a cart with the default discount rules.
///
/// # Errors
///
/// - [`CheckoutError::Catalog`]: a product has no catalog price.
/// - [`CheckoutError::Discount`]: an offer could not be applied.
/// - [`CheckoutError::Pricing`]: totals overflowed.
pub fn checkout<'a>(
    cart: &Cart,
    offers: &Offers,
    catalog: &impl Catalog<'a>,
) -> Result<Receipt<'a>, CheckoutError> {
    checkout_with(&DiscountEngine::default(), cart, offers, catalog)
}

/// Check out a cart using a specific discount engine.
///
/// # Errors
///
/// See [`checkout`].
#[instrument(level = "debug", skip_all, fields(lines = cart.len(), offers = offers.len()))]
pub fn checkout_with<'a>(
    engine: &DiscountEngine,
    cart: &Cart,
    offers: &Offers,
    catalog: &impl Catalog<'a>,
) -> Result<Receipt<'a>, CheckoutError> {
    let mut items: SmallVec<[PricedLineItem<'a>; 8]> = SmallVec::new();

    for line in cart.lines() {
        let unit_price = catalog.price_of(&line.product)?;

        let expected = catalog.currency();
        let actual = unit_price.currency();

        if expected != actual {
            return Err(CheckoutError::CurrencyMismatch(
                expected.iso_alpha_code,
                actual.iso_alpha_code,
            ));
        }

        let line_total = line_total(line.quantity, &unit_price)?;

        debug!(
            product = line.product.name(),
            quantity = %line.quantity,
            line_total_minor = line_total.to_minor_units(),
            "priced line"
        );

        items.push(PricedLineItem {
            product: line.product.clone(),
            quantity: line.quantity,
            unit_price,
            line_total,
        });
    }

    let discounts = engine.compute_priced(&items, offers)?;

    let receipt = Receipt::new(items, discounts, catalog.currency())?;

    info!(
        items = receipt.items().len(),
        discounts = receipt.discounts().len(),
        total_minor = receipt.total().to_minor_units(),
        "checkout complete"
    );

    Ok(receipt)
}

/// A till operator that knows the catalog and the special offers in force.
#[derive(Debug)]
pub struct Teller<'c, C> {
    catalog: &'c C,
    offers: Offers,
    engine: DiscountEngine,
}

impl<'a, 'c, C: Catalog<'a>> Teller<'c, C> {
    /// Create a teller with no offers.
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            offers: Offers::new(),
            engine: DiscountEngine::default(),
        }
    }

    /// Use a specific discount engine.
    #[must_use]
    pub fn with_engine(mut self, engine: DiscountEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Put a special offer in force, replacing any offer on the same product.
    pub fn add_special_offer(&mut self, offer: Offer) -> &mut Self {
        self.offers.insert(offer);
        self
    }

    /// Offers in force.
    pub fn offers(&self) -> &Offers {
        &self.offers
    }

    /// Check out a cart.
    ///
    /// # Errors
    ///
    /// See [`checkout`].
    pub fn checkout(&self, cart: &Cart) -> Result<Receipt<'a>, CheckoutError> {
        checkout_with(&self.engine, cart, &self.offers, self.catalog)
    }
}
