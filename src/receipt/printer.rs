//! Plain-text receipt rendering.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    products::Unit,
    receipt::{PricedLineItem, Receipt, ReceiptError},
};

/// Default receipt width in characters.
pub const DEFAULT_COLUMNS: usize = 40;

/// Renders a [`Receipt`] as fixed-width text.
///
/// ```text
/// toothbrush                          4.95
///   0.99 * 5
/// 3 for 2(toothbrush)                -0.99
///
/// Total:                              3.96
/// ```
#[derive(Debug, Copy, Clone)]
pub struct ReceiptPrinter {
    columns: usize,
}

impl Default for ReceiptPrinter {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl ReceiptPrinter {
    /// Create a printer for the given line width.
    pub fn new(columns: usize) -> Self {
        Self { columns }
    }

    /// Line width in characters.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Render the receipt.
    pub fn render(&self, receipt: &Receipt<'_>) -> String {
        let mut out = String::new();

        for item in receipt.items() {
            self.push_item(&mut out, item);
        }

        for discount in receipt.discounts() {
            let label = format!("{}({})", discount.description, discount.product.name());
            let amount = format_minor(-discount.amount.to_minor_units());

            self.push_line(&mut out, &label, &amount);
        }

        out.push('\n');
        self.push_line(&mut out, "Total:", &format_money(&receipt.total()));

        out
    }

    /// Render the receipt into a writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the writer fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        receipt: &Receipt<'_>,
    ) -> Result<(), ReceiptError> {
        out.write_all(self.render(receipt).as_bytes())?;
        out.flush()?;

        Ok(())
    }

    fn push_item(&self, out: &mut String, item: &PricedLineItem<'_>) {
        self.push_line(out, item.product.name(), &format_money(&item.line_total));

        if item.quantity != Decimal::ONE {
            out.push_str(&format!(
                "  {} * {}\n",
                format_money(&item.unit_price),
                format_quantity(item.quantity, item.product.unit())
            ));
        }
    }

    fn push_line(&self, out: &mut String, left: &str, right: &str) {
        let used = left.chars().count() + right.chars().count();
        let padding = self.columns.saturating_sub(used).max(1);

        out.push_str(left);
        out.extend(std::iter::repeat_n(' ', padding));
        out.push_str(right);
        out.push('\n');
    }
}

/// Format an amount with exactly two decimal digits.
fn format_money(money: &Money<'_, Currency>) -> String {
    format_minor(money.to_minor_units())
}

fn format_minor(minor: i64) -> String {
    format!("{:.2}", Decimal::new(minor, 2))
}

/// Whole units for counted products, three decimals for weighed ones.
fn format_quantity(quantity: Decimal, unit: Unit) -> String {
    match unit {
        Unit::Each => quantity.normalize().to_string(),
        Unit::Weight => format!("{quantity:.3}"),
    }
}
