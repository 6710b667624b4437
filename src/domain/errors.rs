use super::models::FormField;
use std::collections::BTreeMap;

/// A user-correctable problem with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Errors from one validation pass, at most one per field.
///
/// A field with no entry is currently valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, ValidationError::new(field, message));
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Errors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }
}
