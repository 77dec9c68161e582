//! Form state controller: values, derived field errors, and the submit
//! lifecycle.

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::validation::{validate, ValidationSchema};

/// Submission callback a page wires to a form, typically an adapter onto a
/// [`crate::MutationOrchestrator`] write.
#[async_trait]
pub trait SubmitHandler<T>: Send + Sync {
    async fn on_submit(&self, values: &T) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the handler ran. A handler failure is logged and
    /// absorbed rather than surfaced here; the form stays usable for a retry.
    Completed,
    /// Validation failed; the error map was stored and the handler was never
    /// invoked. A normal outcome, not a failure.
    Rejected,
}

/// Owns the values of one form instance for its lifetime. Created when a
/// create/edit dialog opens (seeded with defaults or the selected row) and
/// dropped when it closes; nothing persists across instances.
pub struct FormController<T> {
    values: T,
    errors: BTreeMap<String, String>,
    is_submitting: bool,
    schema: ValidationSchema<T>,
    handler: Arc<dyn SubmitHandler<T>>,
}

impl<T: Send + Sync> FormController<T> {
    pub fn new(
        initial_values: T,
        schema: ValidationSchema<T>,
        handler: Arc<dyn SubmitHandler<T>>,
    ) -> Self {
        Self {
            values: initial_values,
            errors: BTreeMap::new(),
            is_submitting: false,
            schema,
            handler,
        }
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Applies an edit to the form values and clears the edited field's error
    /// if one was recorded. Other fields' errors are untouched; they clear on
    /// the next full validation pass in [`FormController::submit`].
    pub fn set_field(&mut self, field: &str, apply: impl FnOnce(&mut T)) {
        apply(&mut self.values);
        self.errors.remove(field);
    }

    /// Validates and, if clean, runs the submission handler.
    ///
    /// The submitting flag is raised unconditionally before validation and is
    /// cleared on every exit path. A failing handler does not propagate: the
    /// failure is logged and the form returns to idle so the user can retry.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.is_submitting = true;

        let errors = validate(&self.values, &self.schema);
        if !errors.is_empty() {
            self.errors = errors;
            self.is_submitting = false;
            return SubmitOutcome::Rejected;
        }
        self.errors.clear();

        if let Err(err) = self.handler.on_submit(&self.values).await {
            warn!(error = %err, "form submission handler failed");
        }
        self.is_submitting = false;
        SubmitOutcome::Completed
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
