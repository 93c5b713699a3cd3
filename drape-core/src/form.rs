use std::fmt;

/// Input rejected before it reaches a composer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("Cart is empty")]
    EmptyCart,
}

/// The closed set of fields a form accepts.
pub trait FormField: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Wire name of the field, as sent by the view layer.
    fn name(self) -> &'static str;

    fn parse(name: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))
    }
}

/// Mutable form state updated one named field at a time.
pub trait FormState: Default {
    type Field: FormField;

    fn field(&self, field: Self::Field) -> &str;

    fn field_mut(&mut self, field: Self::Field) -> &mut String;

    /// Set a field by its wire name. Unknown names are rejected, the value itself is
    /// only checked when the form is validated.
    fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        let field = Self::Field::parse(name)?;
        *self.field_mut(field) = value.into();
        Ok(())
    }

    /// Clear every field back to its initial value.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Trimmed value of a required field.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value of an optional free-text field, `None` when blank.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Required e-mail address: one `@` between a non-empty local part and a domain, no
/// whitespace. Dotless domains such as `localhost` are accepted.
pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    let valid = !value.contains(char::is_whitespace)
        && match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        };

    if !valid {
        return Err(ValidationError::Malformed {
            field,
            reason: "not an e-mail address".to_string(),
        });
    }
    Ok(value)
}
