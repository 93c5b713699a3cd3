use drape_core::form::{self, FormField, FormState, ValidationError};
use drape_shared::Masked;
use crate::models::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    DeliveryAddress,
    PaymentMethod,
    Notes,
}

impl FormField for CheckoutField {
    const ALL: &'static [Self] = &[
        CheckoutField::CustomerName,
        CheckoutField::CustomerEmail,
        CheckoutField::CustomerPhone,
        CheckoutField::DeliveryAddress,
        CheckoutField::PaymentMethod,
        CheckoutField::Notes,
    ];

    fn name(self) -> &'static str {
        match self {
            CheckoutField::CustomerName => "customer_name",
            CheckoutField::CustomerEmail => "customer_email",
            CheckoutField::CustomerPhone => "customer_phone",
            CheckoutField::DeliveryAddress => "delivery_address",
            CheckoutField::PaymentMethod => "payment_method",
            CheckoutField::Notes => "notes",
        }
    }
}

/// Raw checkout form as typed by the customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    delivery_address: String,
    payment_method: String,
    notes: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            delivery_address: String::new(),
            payment_method: PaymentMethod::default().code().to_string(),
            notes: String::new(),
        }
    }
}

impl FormState for CheckoutForm {
    type Field = CheckoutField;

    fn field(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::CustomerName => &self.customer_name,
            CheckoutField::CustomerEmail => &self.customer_email,
            CheckoutField::CustomerPhone => &self.customer_phone,
            CheckoutField::DeliveryAddress => &self.delivery_address,
            CheckoutField::PaymentMethod => &self.payment_method,
            CheckoutField::Notes => &self.notes,
        }
    }

    fn field_mut(&mut self, field: CheckoutField) -> &mut String {
        match field {
            CheckoutField::CustomerName => &mut self.customer_name,
            CheckoutField::CustomerEmail => &mut self.customer_email,
            CheckoutField::CustomerPhone => &mut self.customer_phone,
            CheckoutField::DeliveryAddress => &mut self.delivery_address,
            CheckoutField::PaymentMethod => &mut self.payment_method,
            CheckoutField::Notes => &mut self.notes,
        }
    }
}

impl CheckoutForm {
    /// Check required fields and parse the payment method.
    pub fn validate(&self) -> Result<CheckoutDetails, ValidationError> {
        let payment_code = form::required("payment_method", &self.payment_method)?;
        let payment_method = PaymentMethod::from_code(&payment_code)
            .ok_or_else(|| ValidationError::Malformed {
                field: "payment_method",
                reason: format!("unknown payment method '{}'", payment_code),
            })?;

        Ok(CheckoutDetails {
            customer_name: form::required("customer_name", &self.customer_name)?,
            customer_email: Masked::new(form::email("customer_email", &self.customer_email)?),
            customer_phone: Masked::new(form::required("customer_phone", &self.customer_phone)?),
            delivery_address: form::required("delivery_address", &self.delivery_address)?,
            payment_method,
            notes: form::optional(&self.notes),
        })
    }
}

/// Validated customer and delivery data, the only input the order composer accepts
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutDetails {
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}
