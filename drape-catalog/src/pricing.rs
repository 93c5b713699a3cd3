use serde::{Deserialize, Serialize};
use drape_core::ValidationError;
use drape_shared::format_amount;
use crate::product::Product;

/// Smallest width or height the workshop will make, in metres
pub const MIN_DIMENSION_M: f64 = 0.5;

/// Default size offered by the calculator before the customer edits it
pub const DEFAULT_WIDTH_M: f64 = 2.0;
pub const DEFAULT_HEIGHT_M: f64 = 3.0;

/// Custom size of one curtain or blind, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Validated size. Both sides must be finite and at least [`MIN_DIMENSION_M`].
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        check_side("width", width)?;
        check_side("height", height)?;
        Ok(Self { width, height })
    }

    /// Size as the calculator inputs produce it: anything non-finite or below the minimum
    /// is raised to [`MIN_DIMENSION_M`].
    pub fn clamped(width: f64, height: f64) -> Self {
        Self {
            width: clamp_side(width),
            height: clamp_side(height),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_M,
            height: DEFAULT_HEIGHT_M,
        }
    }
}

fn check_side(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < MIN_DIMENSION_M {
        return Err(ValidationError::Malformed {
            field,
            reason: format!("must be a number of at least {} m, got {}", MIN_DIMENSION_M, value),
        });
    }
    Ok(())
}

fn clamp_side(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_DIMENSION_M)
    } else {
        MIN_DIMENSION_M
    }
}

/// Price of one unit of `product` made at `dimensions`, at full precision.
///
/// No validation happens here; pass sizes through [`Dimensions::new`] or
/// [`Dimensions::clamped`] first.
pub fn unit_price(product: &Product, dimensions: Dimensions) -> f64 {
    product.price_per_sqm * dimensions.width * dimensions.height
}

/// Result of the size calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub dimensions: Dimensions,
    pub unit_price: f64,
}

impl Quote {
    pub fn display(&self) -> String {
        format_amount(self.unit_price)
    }
}

/// Per-product custom size calculator.
#[derive(Debug, Clone)]
pub struct SizeCalculator {
    product: Product,
    dimensions: Dimensions,
}

impl SizeCalculator {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            dimensions: Dimensions::default(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn set_width(&mut self, width: f64) {
        self.dimensions = Dimensions::clamped(width, self.dimensions.height);
    }

    pub fn set_height(&mut self, height: f64) {
        self.dimensions = Dimensions::clamped(self.dimensions.width, height);
    }

    pub fn quote(&self) -> Quote {
        Quote {
            dimensions: self.dimensions,
            unit_price: unit_price(&self.product, self.dimensions),
        }
    }
}
