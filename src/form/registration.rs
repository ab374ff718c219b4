//! The registration form aggregate

use super::field::{Field, FieldTypeMismatch, FieldValue};
use serde::Serialize;

/// Current values of every registration field.
///
/// Serializes directly into the body expected by the registration endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub phone: String,
    pub cpf: String,
    pub zipcode: String,
    pub address: String,
    pub city: String,
    #[serde(rename = "terms")]
    pub terms_accepted: bool,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a field (empty for the terms flag)
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::PasswordConfirmation => &self.password_confirmation,
            Field::Phone => &self.phone,
            Field::Cpf => &self.cpf,
            Field::Zipcode => &self.zipcode,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Terms => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::PasswordConfirmation => Some(&mut self.password_confirmation),
            Field::Phone => Some(&mut self.phone),
            Field::Cpf => Some(&mut self.cpf),
            Field::Zipcode => Some(&mut self.zipcode),
            Field::Address => Some(&mut self.address),
            Field::City => Some(&mut self.city),
            Field::Terms => None,
        }
    }

    /// Current value of a field
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Terms => FieldValue::Flag(self.terms_accepted),
            other => FieldValue::Text(self.text(other).to_string()),
        }
    }

    /// Assign a value to a field, rejecting values of the wrong kind
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), FieldTypeMismatch> {
        match (field, value) {
            (Field::Terms, FieldValue::Flag(accepted)) => {
                self.terms_accepted = accepted;
                Ok(())
            }
            (Field::Terms, FieldValue::Text(_)) => Err(FieldTypeMismatch {
                field,
                expected: "boolean",
            }),
            (_, FieldValue::Flag(_)) => Err(FieldTypeMismatch {
                field,
                expected: "text",
            }),
            (other, FieldValue::Text(text)) => {
                if let Some(slot) = self.text_mut(other) {
                    *slot = text;
                }
                Ok(())
            }
        }
    }

    /// Push a character to a text field (ignored for the terms flag)
    pub fn push_char(&mut self, field: Field, c: char) {
        if let Some(slot) = self.text_mut(field) {
            slot.push(c);
        }
    }

    /// Remove the last character from a text field
    pub fn pop_char(&mut self, field: Field) {
        if let Some(slot) = self.text_mut(field) {
            slot.pop();
        }
    }

    pub fn toggle_terms(&mut self) {
        self.terms_accepted = !self.terms_accepted;
    }

    /// Clear every field back to its empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
