//! Products

use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// How a product is measured at the till.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Discrete count (toothbrushes, tubes of toothpaste)
    Each,

    /// Fractional kilos (loose apples)
    Weight,
}

/// Product
///
/// Two products with the same name are the same SKU, regardless of unit.
#[derive(Debug, Clone, Eq)]
pub struct Product {
    name: String,
    unit: Unit,
}

impl Product {
    /// Create a new product.
    pub fn new(name: impl Into<String>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            unit,
        }
    }

    /// Create a product sold by count.
    pub fn each(name: impl Into<String>) -> Self {
        Self::new(name, Unit::Each)
    }

    /// Create a product sold by weight.
    pub fn weighed(name: impl Into<String>) -> Self {
        Self::new(name, Unit::Weight)
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product unit
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
