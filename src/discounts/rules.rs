//! Discount rules, one per offer kind.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, DiscountRule},
    pricing::{major_to_minor, minor_decimal, round_minor},
};

/// Buy three, pay for two. Triggered from three units.
#[derive(Debug, Copy, Clone, Default)]
pub struct ThreeForTwo;

/// Percentage off the whole line, applied to the exact (possibly fractional) quantity.
#[derive(Debug, Copy, Clone, Default)]
pub struct PercentOff;

/// `size` units for a fixed bundle price. Triggered from `size` units.
#[derive(Debug, Copy, Clone)]
pub struct BundlePrice {
    size: u32,
}

impl BundlePrice {
    /// Create a bundle rule for groups of `size` units.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Units per bundle.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Split a whole-unit quantity into `(groups, remainder)` for a group size.
fn split_groups(units: Decimal, size: Decimal) -> Result<(Decimal, Decimal), DiscountError> {
    let groups = units
        .checked_div(size)
        .ok_or(DiscountError::Overflow)?
        .floor();

    let remainder = units.checked_rem(size).ok_or(DiscountError::Overflow)?;

    Ok((groups, remainder))
}

/// `full - (groups * bundle + remainder * unit)`, all in minor units.
fn grouped_saving(
    units: Decimal,
    unit_minor: Decimal,
    groups: Decimal,
    bundle_minor: Decimal,
    remainder: Decimal,
) -> Result<Decimal, DiscountError> {
    let full = units.checked_mul(unit_minor).ok_or(DiscountError::Overflow)?;

    let charged = groups
        .checked_mul(bundle_minor)
        .and_then(|bundles| {
            remainder
                .checked_mul(unit_minor)
                .and_then(|rest| bundles.checked_add(rest))
        })
        .ok_or(DiscountError::Overflow)?;

    full.checked_sub(charged).ok_or(DiscountError::Overflow)
}

impl DiscountRule for ThreeForTwo {
    fn compute_discount<'a>(
        &self,
        quantity: Decimal,
        unit_price: &Money<'a, Currency>,
        _argument: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, DiscountError> {
        let units = quantity.trunc();
        let three = Decimal::from(3);

        if units < three {
            return Ok(None);
        }

        let unit_minor = minor_decimal(unit_price)?;
        let (groups, remainder) = split_groups(units, three)?;
        let bundle_minor = unit_minor
            .checked_mul(Decimal::TWO)
            .ok_or(DiscountError::Overflow)?;

        let saving = grouped_saving(units, unit_minor, groups, bundle_minor, remainder)?;

        Ok(Some(Money::from_minor(
            round_minor(saving)?,
            unit_price.currency(),
        )))
    }

    fn describe(&self, _argument: Decimal) -> String {
        "3 for 2".to_string()
    }
}

impl DiscountRule for BundlePrice {
    fn compute_discount<'a>(
        &self,
        quantity: Decimal,
        unit_price: &Money<'a, Currency>,
        argument: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, DiscountError> {
        let units = quantity.trunc();
        let size = Decimal::from(self.size);

        if size.is_zero() || units < size {
            return Ok(None);
        }

        let unit_minor = minor_decimal(unit_price)?;
        let bundle_minor = major_to_minor(argument)?;
        let (groups, remainder) = split_groups(units, size)?;

        let saving = grouped_saving(units, unit_minor, groups, bundle_minor, remainder)?;

        Ok(Some(Money::from_minor(
            round_minor(saving)?,
            unit_price.currency(),
        )))
    }

    fn describe(&self, argument: Decimal) -> String {
        format!("{} for {}", self.size, argument.normalize())
    }
}

impl DiscountRule for PercentOff {
    fn compute_discount<'a>(
        &self,
        quantity: Decimal,
        unit_price: &Money<'a, Currency>,
        argument: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, DiscountError> {
        let line_minor = minor_decimal(unit_price)?
            .checked_mul(quantity)
            .ok_or(DiscountError::Overflow)?;

        let fraction = argument
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(DiscountError::Overflow)?;

        let saving = (Percentage::from(fraction) * Decimal::ONE)
            .checked_mul(line_minor)
            .ok_or(DiscountError::Overflow)?;

        Ok(Some(Money::from_minor(
            round_minor(saving)?,
            unit_price.currency(),
        )))
    }

    fn describe(&self, argument: Decimal) -> String {
        format!("{}% off", argument.normalize())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn minor(result: Option<Money<'_, Currency>>) -> Option<i64> {
        result.map(|m| m.to_minor_units())
    }

    #[test]
    fn three_for_two_needs_three_units() -> TestResult {
        let price = Money::from_minor(99, GBP);

        assert_eq!(
            minor(ThreeForTwo.compute_discount(Decimal::TWO, &price, Decimal::ZERO)?),
            None
        );
        assert_eq!(
            minor(ThreeForTwo.compute_discount(Decimal::from(3), &price, Decimal::ZERO)?),
            Some(99)
        );

        Ok(())
    }

    #[test]
    fn three_for_two_charges_remainder_at_full_price() -> TestResult {
        let price = Money::from_minor(99, GBP);

        assert_eq!(
            minor(ThreeForTwo.compute_discount(Decimal::from(5), &price, Decimal::ZERO)?),
            Some(99)
        );
        assert_eq!(
            minor(ThreeForTwo.compute_discount(Decimal::from(7), &price, Decimal::ZERO)?),
            Some(198)
        );

        Ok(())
    }

    #[test]
    fn three_for_two_truncates_fractional_quantity() -> TestResult {
        let price = Money::from_minor(100, GBP);

        assert_eq!(
            minor(ThreeForTwo.compute_discount(Decimal::new(29, 1), &price, Decimal::ZERO)?),
            None
        );
        assert_eq!(
            minor(ThreeForTwo.compute_discount(Decimal::new(39, 1), &price, Decimal::ZERO)?),
            Some(100)
        );

        Ok(())
    }

    #[test]
    fn two_for_amount() -> TestResult {
        let price = Money::from_minor(69, GBP);
        let rule = BundlePrice::new(2);

        assert_eq!(
            minor(rule.compute_discount(Decimal::ONE, &price, Decimal::new(99, 2))?),
            None
        );
        assert_eq!(
            minor(rule.compute_discount(Decimal::from(5), &price, Decimal::new(99, 2))?),
            Some(78)
        );

        Ok(())
    }

    #[test]
    fn five_for_amount() -> TestResult {
        let price = Money::from_minor(179, GBP);
        let rule = BundlePrice::new(5);

        assert_eq!(
            minor(rule.compute_discount(Decimal::from(4), &price, Decimal::new(749, 2))?),
            None
        );
        assert_eq!(
            minor(rule.compute_discount(Decimal::from(6), &price, Decimal::new(749, 2))?),
            Some(146)
        );

        Ok(())
    }

    #[test]
    fn zero_sized_bundle_never_triggers() -> TestResult {
        let price = Money::from_minor(100, GBP);

        assert_eq!(
            minor(BundlePrice::new(0).compute_discount(Decimal::TEN, &price, Decimal::ONE)?),
            None
        );

        Ok(())
    }

    #[test]
    fn percent_off_applies_to_a_single_unit() -> TestResult {
        let price = Money::from_minor(249, GBP);

        assert_eq!(
            minor(PercentOff.compute_discount(Decimal::ONE, &price, Decimal::TEN)?),
            Some(25)
        );

        Ok(())
    }

    #[test]
    fn percent_off_uses_exact_fractional_quantity() -> TestResult {
        let price = Money::from_minor(199, GBP);

        assert_eq!(
            minor(PercentOff.compute_discount(Decimal::new(25, 1), &price, Decimal::from(20))?),
            Some(100)
        );

        Ok(())
    }

    #[test]
    fn descriptions() {
        assert_eq!(ThreeForTwo.describe(Decimal::ZERO), "3 for 2");
        assert_eq!(PercentOff.describe(Decimal::from(20)), "20% off");
        assert_eq!(PercentOff.describe(Decimal::new(100, 1)), "10% off");
        assert_eq!(BundlePrice::new(2).describe(Decimal::new(99, 2)), "2 for 0.99");
        assert_eq!(BundlePrice::new(5).describe(Decimal::new(749, 2)), "5 for 7.49");
    }

    #[test]
    fn bundle_size_accessor() {
        assert_eq!(BundlePrice::new(5).size(), 5);
    }
}
