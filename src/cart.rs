//! Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::{Product, Unit};

/// Errors related to filling a cart.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities must be strictly positive, and whole for counted products.
    #[error("invalid quantity {0}; quantities must be positive and whole for counted products")]
    InvalidQuantity(Decimal),

    /// The running quantity for the product can no longer be represented.
    #[error("quantity of {0} overflowed")]
    QuantityOverflow(String),
}

/// A product and the running quantity added for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product
    pub product: Product,

    /// Aggregated quantity across every `add` for the product
    pub quantity: Decimal,
}

/// Cart
///
/// Repeated additions of the same product are merged into one line, kept in
/// the order the product was first added.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    index: FxHashMap<Product, usize>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit (one item, or one kilo) of the product.
    ///
    /// The running quantity saturates at [`Decimal::MAX`].
    pub fn add(&mut self, product: &Product) -> &mut Self {
        let quantity = self.current(product).saturating_add(Decimal::ONE);

        self.set(product, quantity);

        self
    }

    /// Add an arbitrary quantity of the product.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: the quantity is zero or negative, or
    ///   fractional for a product sold by count.
    /// - [`CartError::QuantityOverflow`]: the running quantity cannot be represented.
    pub fn add_quantity(
        &mut self,
        product: &Product,
        quantity: Decimal,
    ) -> Result<&mut Self, CartError> {
        if quantity <= Decimal::ZERO
            || (product.unit() == Unit::Each && !quantity.fract().is_zero())
        {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let quantity = self
            .current(product)
            .checked_add(quantity)
            .ok_or_else(|| CartError::QuantityOverflow(product.name().to_string()))?;

        self.set(product, quantity);

        Ok(self)
    }

    /// Lines in first-seen product order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Aggregated quantity of the product, if it is in the cart.
    pub fn quantity_of(&self, product: &Product) -> Option<Decimal> {
        self.index
            .get(product)
            .and_then(|&idx| self.lines.get(idx))
            .map(|line| line.quantity)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn current(&self, product: &Product) -> Decimal {
        self.quantity_of(product).unwrap_or(Decimal::ZERO)
    }

    fn set(&mut self, product: &Product, quantity: Decimal) {
        if let Some(line) = self
            .index
            .get(product)
            .copied()
            .and_then(|idx| self.lines.get_mut(idx))
        {
            line.quantity = quantity;
            return;
        }

        self.index.insert(product.clone(), self.lines.len());
        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
    }
}
