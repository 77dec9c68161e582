//! Field-level form validation, decoupled from any concrete entity shape.

use std::collections::BTreeMap;

type Predicate<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Ordered set of per-field rules. Each rule sees the entire form value, so
/// cross-field checks ("end date after start date") attach to whichever field
/// should carry the message. Fields without a rule are never flagged.
///
/// Immutable once handed to a [`crate::FormController`].
pub struct ValidationSchema<T> {
    rules: Vec<(String, Predicate<T>)>,
}

impl<T> ValidationSchema<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule for `field`. A `Some(message)` return flags the field,
    /// `None` passes it.
    pub fn rule(
        mut self,
        field: impl Into<String>,
        check: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push((field.into(), Box::new(check)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl<T> Default for ValidationSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every rule of `schema` against `values`. Pure and deterministic; the
/// result contains exactly the fields whose rule returned a message, and an
/// empty schema always yields an empty map.
pub fn validate<T>(values: &T, schema: &ValidationSchema<T>) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for (field, check) in &schema.rules {
        if let Some(message) = check(values) {
            errors.insert(field.clone(), message);
        }
    }
    errors
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
