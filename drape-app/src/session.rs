use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use chrono::NaiveDate;
use tracing::{info, warn};
use drape_booking::{Appointment, BookingComposer, BookingForm};
use drape_catalog::{Dimensions, Product};
use drape_core::{
    schedule, CoreResult, FormState, ScheduledHandle, Submission, SubmissionState, ValidationError,
};
use drape_order::{
    AddOutcome, Cart, CartError, CartLine, CartTotals, CheckoutDetails, CheckoutForm,
    OrderComposer, PlacedOrder,
};

pub const ORDER_SUCCESS_NOTICE: &str = "Order placed successfully! We'll contact you soon.";
pub const ORDER_FAILURE_MESSAGE: &str = "Failed to place order. Please try again.";
pub const BOOKING_SUCCESS_NOTICE: &str = "Appointment booked successfully! We'll contact you shortly to confirm.";
pub const BOOKING_FAILURE_MESSAGE: &str = "Failed to book appointment. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    OrderPlaced,
    AppointmentBooked,
}

/// Transient success banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// How long success notices stay up
#[derive(Debug, Clone, Copy)]
pub struct NoticeDelays {
    pub order: Duration,
    pub booking: Duration,
}

impl Default for NoticeDelays {
    fn default() -> Self {
        Self {
            order: Duration::from_secs(3),
            booking: Duration::from_secs(2),
        }
    }
}

/// Snapshot of a checkout taken when the customer submits.
///
/// It owns its copy of the cart, so the session stays editable while the write runs.
/// A successful write takes exactly these lines back out of the live cart.
#[derive(Debug, Clone)]
pub struct PendingCheckout {
    pub cart: Cart,
    pub details: CheckoutDetails,
}

impl PendingCheckout {
    pub async fn submit(&self, composer: &OrderComposer) -> CoreResult<PlacedOrder> {
        composer.place_order(&self.cart, &self.details).await
    }
}

#[derive(Debug, Clone)]
pub struct PendingBooking {
    pub appointment: Appointment,
}

impl PendingBooking {
    pub async fn submit(&self, composer: &BookingComposer) -> CoreResult<()> {
        composer.book(&self.appointment).await
    }
}

/// State of one customer visit: the cart, both forms and their submissions, and the
/// success notice.
pub struct StorefrontSession {
    orders: Arc<OrderComposer>,
    bookings: Arc<BookingComposer>,
    delays: NoticeDelays,
    cart: Cart,
    cart_open: bool,
    checkout: CheckoutForm,
    checkout_submission: Submission,
    booking: BookingForm,
    booking_submission: Submission,
    notice: Arc<Mutex<Option<Notice>>>,
    notice_timer: Option<ScheduledHandle>,
}

impl StorefrontSession {
    pub fn new(orders: Arc<OrderComposer>, bookings: Arc<BookingComposer>, delays: NoticeDelays) -> Self {
        Self {
            orders,
            bookings,
            delays,
            cart: Cart::new(),
            cart_open: false,
            checkout: CheckoutForm::default(),
            checkout_submission: Submission::new(),
            booking: BookingForm::default(),
            booking_submission: Submission::new(),
            notice: Arc::new(Mutex::new(None)),
            notice_timer: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Price and add an item. Adding always brings the cart into view.
    pub fn add_to_cart(
        &mut self,
        product: Product,
        dimensions: Dimensions,
        quantity: u32,
    ) -> Result<AddOutcome, CartError> {
        let line = CartLine::new(product, dimensions, quantity.max(1));
        let outcome = self.cart.add(line)?;
        self.cart_open = true;
        Ok(outcome)
    }

    pub fn increment_quantity(&mut self, index: usize) -> Result<(), CartError> {
        let quantity = self.quantity_at(index)?;
        self.cart.update_quantity(index, quantity.saturating_add(1))
    }

    /// Decrease the quantity, never below 1. Removing a line is a separate action.
    pub fn decrement_quantity(&mut self, index: usize) -> Result<(), CartError> {
        let quantity = self.quantity_at(index)?;
        self.cart.update_quantity(index, quantity.saturating_sub(1).max(1))
    }

    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, CartError> {
        self.cart.remove(index)
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    fn quantity_at(&self, index: usize) -> Result<u32, CartError> {
        self.cart.line(index)
            .map(CartLine::quantity)
            .ok_or(CartError::LineNotFound(index))
    }

    pub fn checkout_form(&self) -> &CheckoutForm {
        &self.checkout
    }

    pub fn checkout_submission(&self) -> &Submission {
        &self.checkout_submission
    }

    pub fn set_checkout_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        self.checkout.set_field(name, value)
    }

    /// Move from the cart to the checkout form. A finished submission is replaced by a
    /// fresh one.
    pub fn open_checkout(&mut self) {
        self.cart_open = false;
        if self.checkout_submission.state() == &SubmissionState::Success {
            self.checkout_submission.reset();
        }
    }

    /// Validate the form and mark the checkout as in flight.
    ///
    /// Fails while a previous checkout is still being written.
    pub fn begin_checkout(&mut self) -> CoreResult<PendingCheckout> {
        if self.cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let details = self.checkout.validate()
            .map_err(|e| {
                warn!("Checkout form rejected: {}", e);
                e
            })?;

        self.checkout_submission.begin()?;

        Ok(PendingCheckout {
            cart: self.cart.clone(),
            details,
        })
    }

    /// Apply the outcome of a checkout write.
    ///
    /// Success removes the ordered lines from the cart, clears the form and shows the
    /// order notice. Items added while the write ran stay in the cart. Failure keeps
    /// everything so the customer can resubmit.
    pub fn finish_checkout(
        &mut self,
        pending: &PendingCheckout,
        result: CoreResult<PlacedOrder>,
    ) -> CoreResult<PlacedOrder> {
        match result {
            Ok(placed) => {
                self.checkout_submission.succeed()?;
                self.cart.remove_ordered(&pending.cart);
                self.cart_open = false;
                self.checkout.reset();
                self.show_notice(NoticeKind::OrderPlaced, ORDER_SUCCESS_NOTICE, self.delays.order);
                info!(order_number = %placed.order.header.order_number, "Checkout complete");
                Ok(placed)
            }
            Err(e) => {
                self.checkout_submission.fail(ORDER_FAILURE_MESSAGE)?;
                Err(e)
            }
        }
    }

    pub async fn place_order(&mut self) -> CoreResult<PlacedOrder> {
        let pending = self.begin_checkout()?;
        let orders = self.orders.clone();
        let result = pending.submit(&orders).await;
        self.finish_checkout(&pending, result)
    }

    pub fn booking_form(&self) -> &BookingForm {
        &self.booking
    }

    pub fn booking_submission(&self) -> &Submission {
        &self.booking_submission
    }

    pub fn set_booking_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        self.booking.set_field(name, value)
    }

    /// Start a new booking after a successful one
    pub fn open_booking(&mut self) {
        if self.booking_submission.state() == &SubmissionState::Success {
            self.booking_submission.reset();
        }
    }

    pub fn begin_booking(&mut self, today: NaiveDate) -> CoreResult<PendingBooking> {
        let appointment = self.booking.validate(today)
            .map_err(|e| {
                warn!("Booking form rejected: {}", e);
                e
            })?;

        self.booking_submission.begin()?;

        Ok(PendingBooking { appointment })
    }

    pub fn finish_booking(&mut self, result: CoreResult<()>) -> CoreResult<()> {
        match result {
            Ok(()) => {
                self.booking_submission.succeed()?;
                self.booking.reset();
                self.show_notice(NoticeKind::AppointmentBooked, BOOKING_SUCCESS_NOTICE, self.delays.booking);
                Ok(())
            }
            Err(e) => {
                self.booking_submission.fail(BOOKING_FAILURE_MESSAGE)?;
                Err(e)
            }
        }
    }

    pub async fn book_consultation(&mut self, today: NaiveDate) -> CoreResult<()> {
        let pending = self.begin_booking(today)?;
        let bookings = self.bookings.clone();
        let result = pending.submit(&bookings).await;
        self.finish_booking(result)
    }

    pub fn current_notice(&self) -> Option<Notice> {
        self.notice.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn dismiss_notice(&mut self) {
        if let Some(timer) = self.notice_timer.take() {
            timer.cancel();
        }
        *self.notice.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Leaving the current view drops the notice and its pending dismissal.
    pub fn navigate_away(&mut self) {
        self.cart_open = false;
        self.dismiss_notice();
    }

    /// Must run inside a tokio runtime; the dismissal is a spawned task.
    fn show_notice(&mut self, kind: NoticeKind, message: &str, delay: Duration) {
        self.dismiss_notice();

        let notice = Notice {
            kind,
            message: message.to_string(),
        };
        *self.notice.lock().unwrap_or_else(PoisonError::into_inner) = Some(notice.clone());

        let slot = self.notice.clone();
        self.notice_timer = Some(schedule(delay, move || {
            let mut current = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if current.as_ref() == Some(&notice) {
                *current = None;
            }
        }));
    }
}
