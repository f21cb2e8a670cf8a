#![forbid(unsafe_code)]

//! The form model collaborator.

use std::collections::BTreeMap;

use formcue_core::ValidationState;

/// Source of validation snapshots for one form.
pub trait FormModel {
    /// Name of the form; first half of every field's binding key.
    fn form_name(&self) -> &str;

    /// Current snapshot of `field`, `None` when the model does not know it.
    fn field_state(&self, field: &str) -> Option<ValidationState>;
}

/// A [`FormModel`] holding snapshots pushed into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticFormModel {
    name: String,
    fields: BTreeMap<String, ValidationState>,
}

impl StaticFormModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, state: ValidationState) -> Self {
        self.set_field(field, state);
        self
    }

    pub fn set_field(&mut self, field: impl Into<String>, state: ValidationState) {
        self.fields.insert(field.into(), state);
    }
}

impl FormModel for StaticFormModel {
    fn form_name(&self) -> &str {
        &self.name
    }

    fn field_state(&self, field: &str) -> Option<ValidationState> {
        self.fields.get(field).cloned()
    }
}
