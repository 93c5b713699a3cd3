//! Money helpers. Amounts are carried as `f64` at full precision and only
//! rounded when shown to a customer.

/// Display currency of the storefront.
pub const CURRENCY: &str = "AED";

/// Format an amount for display, e.g. `AED 472.50`.
pub fn format_amount(amount: f64) -> String {
    format!("{} {:.2}", CURRENCY, amount)
}
