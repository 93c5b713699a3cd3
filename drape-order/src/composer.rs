use std::sync::Arc;
use tracing::{error, info, warn};
use drape_core::{CoreResult, ValidationError};
use crate::cart::Cart;
use crate::checkout::CheckoutDetails;
use crate::models::{OrderHeader, OrderLine, PlacedOrder};
use crate::number::OrderNumberGenerator;
use crate::repository::OrderRepository;

/// Turns a cart and validated checkout details into persisted order records.
///
/// The header is written first; lines are written only once the store has assigned the
/// order id. There is no rollback: if the line write fails the header stays behind.
/// The composer never touches the cart, clearing it is the caller's job.
pub struct OrderComposer {
    repository: Arc<dyn OrderRepository>,
    numbers: OrderNumberGenerator,
}

impl OrderComposer {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            repository,
            numbers: OrderNumberGenerator::new(),
        }
    }

    /// Snapshot the cart totals into a new header with a fresh order number
    pub fn compose_header(&self, cart: &Cart, details: &CheckoutDetails) -> OrderHeader {
        let totals = cart.totals();
        OrderHeader {
            order_number: self.numbers.next(),
            customer_name: details.customer_name.clone(),
            customer_email: details.customer_email.clone(),
            customer_phone: details.customer_phone.clone(),
            delivery_address: details.delivery_address.clone(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            payment_method: details.payment_method,
            notes: details.notes.clone(),
        }
    }

    pub async fn place_order(&self, cart: &Cart, details: &CheckoutDetails) -> CoreResult<PlacedOrder> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let header = self.compose_header(cart, details);
        let order_number = header.order_number.clone();

        // 1. Header
        let order = self.repository.insert_order(&header).await
            .map_err(|e| {
                error!(order_number = %order_number, "Failed to write order header: {}", e);
                e
            })?;

        // 2. Lines, keyed by the id the store assigned
        let lines: Vec<OrderLine> = cart.lines().iter()
            .map(|line| OrderLine::from_cart_line(order.id, line))
            .collect();

        if let Err(e) = self.repository.insert_order_lines(&lines).await {
            warn!(
                order_number = %order_number,
                order_id = %order.id,
                "Order header written but {} line(s) failed: {}",
                lines.len(),
                e
            );
            return Err(e.into());
        }

        info!(
            order_number = %order_number,
            order_id = %order.id,
            lines = lines.len(),
            total = order.header.total,
            "Order placed"
        );

        Ok(PlacedOrder { order, lines })
    }
}
