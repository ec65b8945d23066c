//! Discounts
//!
//! The discount engine turns a cart's aggregated quantities into at most one
//! discount per product. Each offer kind is handled by a [`DiscountRule`]
//! looked up in the engine's rule table.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::CartLine,
    catalog::{Catalog, CatalogError},
    offers::{Offer, OfferKind, Offers},
    pricing::{PricingError, line_total},
    products::Product,
    receipt::PricedLineItem,
};

pub mod rules;

use rules::{BundlePrice, PercentOff, ThreeForTwo};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// No rule is registered for the offer kind.
    #[error("unsupported offer kind: {0}")]
    UnsupportedOfferKind(OfferKind),

    /// Discount arithmetic could not be represented in minor units.
    #[error("discount calculation overflowed")]
    Overflow,

    /// A discounted product has no catalog price.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<PricingError> for DiscountError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Overflow => DiscountError::Overflow,
        }
    }
}

/// A computed reduction for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount<'a> {
    /// Discounted product
    pub product: Product,

    /// Short label, e.g. `3 for 2`
    pub description: String,

    /// Amount subtracted from the receipt total; always positive
    pub amount: Money<'a, Currency>,
}

/// Discount calculation for one offer kind.
pub trait DiscountRule: fmt::Debug {
    /// Amount to take off `quantity` units at `unit_price`, or `None` when the
    /// offer is not triggered. The result is rounded to whole minor units.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the calculation cannot be represented.
    fn compute_discount<'a>(
        &self,
        quantity: Decimal,
        unit_price: &Money<'a, Currency>,
        argument: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, DiscountError>;

    /// Receipt label for an offer with the given argument.
    fn describe(&self, argument: Decimal) -> String;
}

/// Discount engine
#[derive(Debug)]
pub struct DiscountEngine {
    rules: FxHashMap<OfferKind, Box<dyn DiscountRule>>,
}

impl Default for DiscountEngine {
    /// An engine with a rule for every [`OfferKind`].
    fn default() -> Self {
        Self::empty()
            .with_rule(OfferKind::ThreeForTwo, ThreeForTwo)
            .with_rule(OfferKind::TenPercentDiscount, PercentOff)
            .with_rule(OfferKind::TwoForAmount, BundlePrice::new(2))
            .with_rule(OfferKind::FiveForAmount, BundlePrice::new(5))
    }
}

impl DiscountEngine {
    /// An engine with no rules.
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// Register (or replace) the rule used for an offer kind.
    #[must_use]
    pub fn with_rule(mut self, kind: OfferKind, rule: impl DiscountRule + 'static) -> Self {
        self.rules.insert(kind, Box::new(rule));
        self
    }

    /// Apply a single offer to a product's quantity.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::UnsupportedOfferKind`]: no rule for the offer's kind.
    /// - [`DiscountError::Overflow`]: the discount cannot be represented.
    pub fn discount_for<'a>(
        &self,
        offer: &Offer,
        quantity: Decimal,
        unit_price: &Money<'a, Currency>,
    ) -> Result<Option<Discount<'a>>, DiscountError> {
        let rule = self
            .rules
            .get(&offer.kind)
            .ok_or(DiscountError::UnsupportedOfferKind(offer.kind))?;

        let Some(amount) = rule.compute_discount(quantity, unit_price, offer.argument)? else {
            return Ok(None);
        };

        if amount.to_minor_units() <= 0 {
            return Ok(None);
        }

        debug!(
            product = offer.product.name(),
            kind = %offer.kind,
            %quantity,
            discount_minor = amount.to_minor_units(),
            "offer applied"
        );

        Ok(Some(Discount {
            product: offer.product.clone(),
            description: rule.describe(offer.argument),
            amount,
        }))
    }

    /// Compute the discounts for a cart, in cart line order.
    ///
    /// Only lines with an offer are priced.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::Catalog`]: a product with an offer has no catalog price.
    /// - [`DiscountError::UnsupportedOfferKind`]: no rule for an offer's kind.
    /// - [`DiscountError::Overflow`]: a discount cannot be represented.
    pub fn compute<'a>(
        &self,
        lines: &[CartLine],
        offers: &Offers,
        catalog: &impl Catalog<'a>,
    ) -> Result<SmallVec<[Discount<'a>; 4]>, DiscountError> {
        let mut items: SmallVec<[PricedLineItem<'a>; 8]> = SmallVec::new();

        for line in lines.iter().filter(|line| offers.get(&line.product).is_some()) {
            let unit_price = catalog.price_of(&line.product)?;

            items.push(PricedLineItem {
                product: line.product.clone(),
                quantity: line.quantity,
                line_total: line_total(line.quantity, &unit_price)?,
                unit_price,
            });
        }

        self.compute_priced(&items, offers)
    }

    /// Compute the discounts for already-priced items, in item order.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::UnsupportedOfferKind`]: no rule for an offer's kind.
    /// - [`DiscountError::Overflow`]: a discount cannot be represented.
    pub fn compute_priced<'a>(
        &self,
        items: &[PricedLineItem<'a>],
        offers: &Offers,
    ) -> Result<SmallVec<[Discount<'a>; 4]>, DiscountError> {
        let mut discounts = SmallVec::new();

        for item in items {
            let Some(offer) = offers.get(&item.product) else {
                continue;
            };

            if let Some(discount) = self.discount_for(offer, item.quantity, &item.unit_price)? {
                discounts.push(discount);
            }
        }

        Ok(discounts)
    }
}
