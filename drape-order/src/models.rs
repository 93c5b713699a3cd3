use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use drape_shared::Masked;
use crate::cart::CartLine;
use crate::number::OrderNumber;

/// Payment method chosen at checkout. A label only; no payment is taken.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Installment,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Installment,
        PaymentMethod::BankTransfer,
    ];

    /// Value stored in `orders.payment_method`
    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Installment => "installment",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash on Delivery",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Installment => "Installment Plan",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

/// Order header as written to the store. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHeader {
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub delivery_address: String,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Header echoed back by the store with its generated identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrder {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub header: OrderHeader,
}

/// One persisted line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub width: f64,
    pub height: f64,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

impl OrderLine {
    pub fn from_cart_line(order_id: Uuid, line: &CartLine) -> Self {
        let dimensions = line.dimensions();
        Self {
            order_id,
            product_id: line.product().id,
            product_name: line.product().name.clone(),
            width: dimensions.width,
            height: dimensions.height,
            quantity: line.quantity(),
            unit_price: line.price(),
            total_price: line.line_total(),
        }
    }
}

/// Everything written for one checkout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrder {
    pub order: StoredOrder,
    pub lines: Vec<OrderLine>,
}
