//! Offers
//!
//! Special offers bound to a single product. The registry holds at most one
//! active offer per product.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::Product;

/// Errors raised while configuring offers.
#[derive(Debug, Error, PartialEq)]
pub enum OfferError {
    /// The offer kind name is not recognised.
    #[error("unsupported offer kind: {0}")]
    UnsupportedOfferKind(String),
}

/// Kinds of special offer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OfferKind {
    /// Buy three, pay for two.
    ThreeForTwo,

    /// Percentage off the line; the argument is the percent (e.g. `20`).
    TenPercentDiscount,

    /// Two units for a bundle price; the argument is the bundle price.
    TwoForAmount,

    /// Five units for a bundle price; the argument is the bundle price.
    FiveForAmount,
}

impl OfferKind {
    /// All offer kinds.
    pub const ALL: [OfferKind; 4] = [
        OfferKind::ThreeForTwo,
        OfferKind::TenPercentDiscount,
        OfferKind::TwoForAmount,
        OfferKind::FiveForAmount,
    ];

    fn as_str(self) -> &'static str {
        match self {
            OfferKind::ThreeForTwo => "three_for_two",
            OfferKind::TenPercentDiscount => "ten_percent_discount",
            OfferKind::TwoForAmount => "two_for_amount",
            OfferKind::FiveForAmount => "five_for_amount",
        }
    }
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferKind {
    type Err = OfferError;

    /// Accepts `snake_case` names as well as `ThreeForTwo`-style names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        OfferKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().replace('_', "") == normalised)
            .ok_or_else(|| OfferError::UnsupportedOfferKind(s.to_string()))
    }
}

/// A special offer on one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    /// Offer kind
    pub kind: OfferKind,

    /// Product the offer applies to
    pub product: Product,

    /// Percent for [`OfferKind::TenPercentDiscount`], bundle price for the
    /// amount offers, unused for [`OfferKind::ThreeForTwo`].
    pub argument: Decimal,
}

impl Offer {
    /// Create a new offer.
    pub fn new(kind: OfferKind, product: Product, argument: Decimal) -> Self {
        Self {
            kind,
            product,
            argument,
        }
    }
}

/// Offer registry
#[derive(Debug, Default, Clone)]
pub struct Offers {
    offers: FxHashMap<Product, Offer>,
}

impl Offers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an offer, returning any offer it replaced for the same product.
    pub fn insert(&mut self, offer: Offer) -> Option<Offer> {
        self.offers.insert(offer.product.clone(), offer)
    }

    /// Active offer for the product.
    pub fn get(&self, product: &Product) -> Option<&Offer> {
        self.offers.get(product)
    }

    /// Iterate over all offers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.values()
    }

    /// Number of registered offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if there are no offers.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl FromIterator<Offer> for Offers {
    fn from_iter<I: IntoIterator<Item = Offer>>(iter: I) -> Self {
        let mut offers = Offers::new();

        for offer in iter {
            offers.insert(offer);
        }

        offers
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn offer_kind_parses_snake_case_and_kata_names() -> TestResult {
        assert_eq!("three_for_two".parse::<OfferKind>()?, OfferKind::ThreeForTwo);
        assert_eq!(
            "TenPercentDiscount".parse::<OfferKind>()?,
            OfferKind::TenPercentDiscount
        );
        assert_eq!(" two-for-amount ".parse::<OfferKind>()?, OfferKind::TwoForAmount);
        assert_eq!("FIVE_FOR_AMOUNT".parse::<OfferKind>()?, OfferKind::FiveForAmount);

        Ok(())
    }

    #[test]
    fn offer_kind_rejects_unknown_names() {
        assert_eq!(
            "buy_one_get_one".parse::<OfferKind>(),
            Err(OfferError::UnsupportedOfferKind("buy_one_get_one".to_string()))
        );
    }

    #[test]
    fn offer_kind_display_round_trips() -> TestResult {
        for kind in OfferKind::ALL {
            assert_eq!(kind.to_string().parse::<OfferKind>()?, kind);
        }

        Ok(())
    }

    #[test]
    fn insert_replaces_existing_offer_for_product() {
        let rice = Product::each("rice");
        let mut offers = Offers::new();

        let first = offers.insert(Offer::new(
            OfferKind::ThreeForTwo,
            rice.clone(),
            Decimal::ZERO,
        ));

        let replaced = offers.insert(Offer::new(
            OfferKind::TenPercentDiscount,
            rice.clone(),
            Decimal::TEN,
        ));

        assert_eq!(first, None);
        assert_eq!(replaced.map(|o| o.kind), Some(OfferKind::ThreeForTwo));
        assert_eq!(offers.len(), 1);
        assert_eq!(
            offers.get(&rice).map(|o| o.kind),
            Some(OfferKind::TenPercentDiscount)
        );
    }

    #[test]
    fn collects_from_iterator() {
        let offers: Offers = [
            Offer::new(OfferKind::ThreeForTwo, Product::each("a"), Decimal::ZERO),
            Offer::new(OfferKind::TwoForAmount, Product::each("b"), Decimal::ONE),
        ]
        .into_iter()
        .collect();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers.iter().count(), 2);
        assert!(!offers.is_empty());
    }
}
