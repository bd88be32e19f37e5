//! Form state as a plain value with reducer-style transitions.

use serde::{Deserialize, Serialize};

use super::field::FieldId;

/// Raw field values plus the "validated" flag that turns on inline feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub begin_point: String,
    pub end_point: String,
    pub amount: String,
    pub stock: String,
    pub validated: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Stock => &self.stock,
            FieldId::Begin => &self.begin_point,
            FieldId::End => &self.end_point,
            FieldId::Amount => &self.amount,
        }
    }

    /// Replace one field's value.
    pub fn with_field(mut self, field: FieldId, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            FieldId::Stock => self.stock = value,
            FieldId::Begin => self.begin_point = value,
            FieldId::End => self.end_point = value,
            FieldId::Amount => self.amount = value,
        }
        self
    }

    pub fn mark_validated(mut self) -> Self {
        self.validated = true;
        self
    }

    pub fn is_field_valid(&self, field: FieldId) -> bool {
        field.is_valid(self.value(field))
    }

    /// Aggregate check: every field valid at once.
    pub fn is_valid(&self) -> bool {
        FieldId::ALL.iter().all(|&field| self.is_field_valid(field))
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|&field| !self.is_field_valid(field))
            .collect()
    }

    /// Feedback text for a field, shown only after a submit attempt.
    pub fn feedback(&self, field: FieldId) -> Option<&'static str> {
        (self.validated && !self.is_field_valid(field)).then(|| field.feedback())
    }
}
