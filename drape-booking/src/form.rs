use chrono::NaiveDate;
use drape_core::form::{self, FormField, FormState, ValidationError};
use drape_shared::Masked;
use crate::appointment::{Appointment, TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    CustomerAddress,
    PreferredDate,
    PreferredTime,
    Notes,
}

impl FormField for BookingField {
    const ALL: &'static [Self] = &[
        BookingField::CustomerName,
        BookingField::CustomerEmail,
        BookingField::CustomerPhone,
        BookingField::CustomerAddress,
        BookingField::PreferredDate,
        BookingField::PreferredTime,
        BookingField::Notes,
    ];

    fn name(self) -> &'static str {
        match self {
            BookingField::CustomerName => "customer_name",
            BookingField::CustomerEmail => "customer_email",
            BookingField::CustomerPhone => "customer_phone",
            BookingField::CustomerAddress => "customer_address",
            BookingField::PreferredDate => "preferred_date",
            BookingField::PreferredTime => "preferred_time",
            BookingField::Notes => "notes",
        }
    }
}

/// Consultation booking form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_address: String,
    preferred_date: String,
    preferred_time: String,
    notes: String,
}

impl FormState for BookingForm {
    type Field = BookingField;

    fn field(&self, field: BookingField) -> &str {
        match field {
            BookingField::CustomerName => &self.customer_name,
            BookingField::CustomerEmail => &self.customer_email,
            BookingField::CustomerPhone => &self.customer_phone,
            BookingField::CustomerAddress => &self.customer_address,
            BookingField::PreferredDate => &self.preferred_date,
            BookingField::PreferredTime => &self.preferred_time,
            BookingField::Notes => &self.notes,
        }
    }

    fn field_mut(&mut self, field: BookingField) -> &mut String {
        match field {
            BookingField::CustomerName => &mut self.customer_name,
            BookingField::CustomerEmail => &mut self.customer_email,
            BookingField::CustomerPhone => &mut self.customer_phone,
            BookingField::CustomerAddress => &mut self.customer_address,
            BookingField::PreferredDate => &mut self.preferred_date,
            BookingField::PreferredTime => &mut self.preferred_time,
            BookingField::Notes => &mut self.notes,
        }
    }
}

impl BookingForm {
    /// Check the form against `today`. The preferred date may be today but not earlier.
    pub fn validate(&self, today: NaiveDate) -> Result<Appointment, ValidationError> {
        let customer_name = form::required("customer_name", &self.customer_name)?;
        let customer_email = form::email("customer_email", &self.customer_email)?;
        let customer_phone = form::required("customer_phone", &self.customer_phone)?;
        let customer_address = form::required("customer_address", &self.customer_address)?;

        let date = form::required("preferred_date", &self.preferred_date)?;
        let preferred_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| ValidationError::Malformed {
                field: "preferred_date",
                reason: format!("'{}' is not a YYYY-MM-DD date", date),
            })?;
        if preferred_date < today {
            return Err(ValidationError::Malformed {
                field: "preferred_date",
                reason: format!("{} is before {}", preferred_date, today),
            });
        }

        let time = form::required("preferred_time", &self.preferred_time)?;
        let preferred_time = TimeSlot::from_label(&time)
            .ok_or_else(|| ValidationError::Malformed {
                field: "preferred_time",
                reason: format!("'{}' is not an offered time slot", time),
            })?;

        Ok(Appointment {
            customer_name,
            customer_email: Masked::new(customer_email),
            customer_phone: Masked::new(customer_phone),
            customer_address,
            preferred_date,
            preferred_time,
            notes: form::optional(&self.notes),
        })
    }
}
