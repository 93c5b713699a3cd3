use serde::Serialize;
use drape_catalog::{unit_price, Dimensions, Product};

/// Flat VAT applied to the cart subtotal
pub const VAT_RATE: f64 = 0.05;

/// Largest quantity one cart line may carry
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One product at one custom size.
///
/// `price` is the unit price for `dimensions` and is fixed when the line is created;
/// quantity changes never touch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    product: Product,
    dimensions: Dimensions,
    quantity: u32,
    price: f64,
}

impl CartLine {
    /// Price the line from the product's rate. `quantity` must be at least 1.
    pub fn new(product: Product, dimensions: Dimensions, quantity: u32) -> Self {
        let price = unit_price(&product, dimensions);
        Self {
            product,
            dimensions,
            quantity,
            price,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price of one item at this size
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Two lines are the same item when product and both dimensions match exactly.
    fn same_item(&self, other: &CartLine) -> bool {
        self.product.id == other.product.id
            && self.dimensions.width == other.dimensions.width
            && self.dimensions.height == other.dimensions.height
    }
}

/// Derived money values of a cart
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl CartTotals {
    pub fn from_subtotal(subtotal: f64) -> Self {
        let tax = subtotal * VAT_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// What `Cart::add` did with the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Merged { index: usize },
    Appended { index: usize },
}

/// Session cart. Lines keep insertion order; positions shift down after a removal, so
/// indices must not be held across `remove`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge into an existing line for the same product and size, or append.
    ///
    /// The cart is left unchanged when the resulting quantity would exceed
    /// [`MAX_LINE_QUANTITY`].
    pub fn add(&mut self, line: CartLine) -> Result<AddOutcome, CartError> {
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(index) = self.lines.iter().position(|l| l.same_item(&line)) {
            let existing = &mut self.lines[index];
            existing.quantity = checked_quantity(existing.quantity.checked_add(line.quantity))?;
            return Ok(AddOutcome::Merged { index });
        }

        checked_quantity(Some(line.quantity))?;
        self.lines.push(line);
        Ok(AddOutcome::Appended {
            index: self.lines.len() - 1,
        })
    }

    /// Replace the quantity at `index`. Callers clamp to at least 1 beforehand.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        checked_quantity(Some(quantity))?;

        let line = self.lines.get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove and return the line at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Recomputed from the current lines on every call.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.lines.iter().map(CartLine::line_total).sum();
        CartTotals::from_subtotal(subtotal)
    }

    /// Number of items across all lines (cart badge)
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take out what `ordered`, an earlier snapshot of this cart, contained.
    ///
    /// Lines added after the snapshot stay, and a line topped up since keeps the extra
    /// quantity. Lines that reach zero are dropped.
    pub fn remove_ordered(&mut self, ordered: &Cart) {
        for placed in &ordered.lines {
            if let Some(line) = self.lines.iter_mut().find(|l| l.same_item(placed)) {
                line.quantity = line.quantity.saturating_sub(placed.quantity);
            }
        }
        self.lines.retain(|l| l.quantity > 0);
    }
}

fn checked_quantity(quantity: Option<u32>) -> Result<u32, CartError> {
    quantity
        .filter(|q| *q <= MAX_LINE_QUANTITY)
        .ok_or(CartError::QuantityTooLarge { max: MAX_LINE_QUANTITY })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("No cart line at position {0}")]
    LineNotFound(usize),

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Quantity per line cannot exceed {max}")]
    QuantityTooLarge { max: u32 },
}
