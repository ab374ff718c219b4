//! Form field identifiers and value objects

use std::fmt;

/// Every field of the registration form.
///
/// The set is closed: server-reported field names are mapped through
/// [`Field::from_wire`] and anything unknown is dropped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    PasswordConfirmation,
    Phone,
    Cpf,
    Zipcode,
    Address,
    City,
    Terms,
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::PasswordConfirmation,
        Field::Phone,
        Field::Cpf,
        Field::Zipcode,
        Field::Address,
        Field::City,
        Field::Terms,
    ];

    /// Name used in the JSON payload and in server error maps
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::PasswordConfirmation => "password_confirmation",
            Self::Phone => "phone",
            Self::Cpf => "cpf",
            Self::Zipcode => "zipcode",
            Self::Address => "address",
            Self::City => "city",
            Self::Terms => "terms",
        }
    }

    /// Parse a wire name back into a field
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nome Completo",
            Self::Email => "E-mail",
            Self::Password => "Senha",
            Self::PasswordConfirmation => "Confirmar Senha",
            Self::Phone => "Telefone Celular",
            Self::Cpf => "CPF",
            Self::Zipcode => "CEP",
            Self::Address => "Endereço",
            Self::City => "Cidade",
            Self::Terms => "Aceito os termos e condições",
        }
    }

    /// Whether the field holds a secret that should be masked on screen
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::PasswordConfirmation)
    }

    /// Whether the field holds a boolean rather than text
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Terms)
    }

    /// Next field in display order (wraps around)
    pub fn next(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field in display order (wraps around)
    pub fn prev(&self) -> Self {
        let idx = self.index();
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// A value of the wrong kind was assigned to a field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` expects a {expected} value")]
pub struct FieldTypeMismatch {
    pub field: Field,
    pub expected: &'static str,
}
