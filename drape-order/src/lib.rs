pub mod cart;
pub mod models;
pub mod number;
pub mod checkout;
pub mod composer;
pub mod repository;

pub use cart::{AddOutcome, Cart, CartError, CartLine, CartTotals, MAX_LINE_QUANTITY, VAT_RATE};
pub use models::{OrderHeader, OrderLine, PaymentMethod, PlacedOrder, StoredOrder};
pub use number::{OrderNumber, OrderNumberGenerator};
pub use checkout::{CheckoutDetails, CheckoutField, CheckoutForm};
pub use composer::OrderComposer;
pub use repository::OrderRepository;
