//! Per-field error messages

use super::field::Field;
use std::collections::BTreeMap;

/// Mapping from field to the message shown under it.
///
/// Holds at most one message per field. Local validation and remote
/// rejections both write into the same set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, keeping an existing one for the same field
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.messages.entry(field).or_insert_with(|| message.into());
    }

    /// Record a message, overwriting any existing one for the same field
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Merge `other` on top of `self`; messages from `other` win
    pub fn merge(&mut self, other: FieldErrors) {
        self.messages.extend(other.messages);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.messages.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.set(field, message);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_first_message() {
        let mut errors = FieldErrors::new();
        errors.add(Field::Email, "first");
        errors.add(Field::Email, "second");
        assert_eq!(errors.get(Field::Email), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut errors = FieldErrors::new();
        errors.set(Field::Email, "first");
        errors.set(Field::Email, "second");
        assert_eq!(errors.get(Field::Email), Some("second"));
    }

    #[test]
    fn test_merge_overwrites_by_field() {
        let mut local: FieldErrors = [
            (Field::Name, "Nome é obrigatório".to_string()),
            (Field::Email, "E-mail inválido".to_string()),
        ]
        .into_iter()
        .collect();
        let remote: FieldErrors = [(Field::Email, "already taken".to_string())]
            .into_iter()
            .collect();

        local.merge(remote);

        assert_eq!(local.len(), 2);
        assert_eq!(local.get(Field::Name), Some("Nome é obrigatório"));
        assert_eq!(local.get(Field::Email), Some("already taken"));
    }

    #[test]
    fn test_iter_follows_field_order() {
        let errors: FieldErrors = [
            (Field::City, "c".to_string()),
            (Field::Name, "n".to_string()),
        ]
        .into_iter()
        .collect();
        let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Name, Field::City]);
    }

    #[test]
    fn test_clear() {
        let mut errors = FieldErrors::new();
        errors.set(Field::Cpf, "CPF inválido");
        errors.clear();
        assert!(errors.is_empty());
        assert!(!errors.contains(Field::Cpf));
    }
}
