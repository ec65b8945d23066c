//! Pricing
//!
//! Minor-unit arithmetic shared by line totals and discount rules. Every amount
//! that leaves this module has already been rounded to whole minor units.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while pricing a line or summing a receipt.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Minor-unit arithmetic overflowed.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Convert a money amount into a decimal count of minor units.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the minor units cannot be represented.
pub fn minor_decimal(money: &Money<'_, Currency>) -> Result<Decimal, PricingError> {
    Decimal::from_i64(money.to_minor_units()).ok_or(PricingError::Overflow)
}

/// Convert a major-unit amount (e.g. `7.49`) into a decimal count of minor units.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the amount cannot be represented.
pub fn major_to_minor(major: Decimal) -> Result<Decimal, PricingError> {
    major
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(PricingError::Overflow)
}

/// Round a decimal count of minor units to a whole number of minor units.
///
/// Midpoints round away from zero, so 497.5 becomes 498.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the rounded value does not fit in an `i64`.
pub fn round_minor(minor: Decimal) -> Result<i64, PricingError> {
    minor
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)
}

/// Calculates `quantity * unit_price`, rounded to currency precision.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product cannot be represented.
pub fn line_total<'a>(
    quantity: Decimal,
    unit_price: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, PricingError> {
    let exact = minor_decimal(unit_price)?
        .checked_mul(quantity)
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(round_minor(exact)?, unit_price.currency()))
}

/// Sums already-rounded amounts.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in an `i64`.
pub fn total_price<'a, 'm>(
    amounts: impl IntoIterator<Item = &'m Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError>
where
    'a: 'm,
{
    let minor = amounts.into_iter().try_fold(0i64, |acc, amount| {
        acc.checked_add(amount.to_minor_units())
            .ok_or(PricingError::Overflow)
    })?;

    Ok(Money::from_minor(minor, currency))
}
