//! Receipt

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    discounts::Discount,
    pricing::{PricingError, total_price},
    products::Product,
};

mod printer;

pub use printer::{DEFAULT_COLUMNS, ReceiptPrinter};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("failed to write receipt: {0}")]
    Io(#[from] std::io::Error),
}

/// A priced cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLineItem<'a> {
    /// Product
    pub product: Product,

    /// Aggregated quantity
    pub quantity: Decimal,

    /// Catalog price per unit
    pub unit_price: Money<'a, Currency>,

    /// `quantity * unit_price`, rounded to currency precision
    pub line_total: Money<'a, Currency>,
}

/// Final receipt for a checked-out cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Line items in checkout order
    items: SmallVec<[PricedLineItem<'a>; 8]>,

    /// Discounts in the same product order as the items
    discounts: SmallVec<[Discount<'a>; 4]>,

    /// Sum of all line totals
    subtotal: Money<'a, Currency>,

    /// Sum of all discount amounts
    total_discount: Money<'a, Currency>,

    /// Amount to pay
    total: Money<'a, Currency>,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Create a receipt, totalling the already-rounded line items and discounts.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the totals cannot be represented.
    pub fn new(
        items: SmallVec<[PricedLineItem<'a>; 8]>,
        discounts: SmallVec<[Discount<'a>; 4]>,
        currency: &'static Currency,
    ) -> Result<Self, PricingError> {
        let subtotal = total_price(items.iter().map(|item| &item.line_total), currency)?;
        let total_discount = total_price(discounts.iter().map(|d| &d.amount), currency)?;

        let total_minor = subtotal
            .to_minor_units()
            .checked_sub(total_discount.to_minor_units())
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            items,
            discounts,
            subtotal,
            total_discount,
            total: Money::from_minor(total_minor, currency),
            currency,
        })
    }

    /// Line items in checkout order.
    pub fn items(&self) -> &[PricedLineItem<'a>] {
        &self.items
    }

    /// Discounts in checkout order.
    pub fn discounts(&self) -> &[Discount<'a>] {
        &self.discounts
    }

    /// Total cost before any discounts
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Sum of all discounts
    pub fn total_discount(&self) -> Money<'a, Currency> {
        self.total_discount
    }

    /// Total amount paid
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Savings made by applying offers; the same amount as [`Receipt::total_discount`].
    pub fn savings(&self) -> Money<'a, Currency> {
        self.total_discount
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
