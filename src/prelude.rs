//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    checkout::{CheckoutError, Teller, checkout, checkout_with},
    discounts::{
        Discount, DiscountEngine, DiscountError, DiscountRule,
        rules::{BundlePrice, PercentOff, ThreeForTwo},
    },
    fixtures::{Fixture, FixtureError},
    offers::{Offer, OfferError, OfferKind, Offers},
    pricing::PricingError,
    products::{Product, Unit},
    receipt::{DEFAULT_COLUMNS, PricedLineItem, Receipt, ReceiptError, ReceiptPrinter},
};
