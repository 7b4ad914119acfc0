use std::collections::BTreeMap;

use serde::Serialize;

/// Field name to error message, ordered by field for stable output.
pub type FieldErrors = BTreeMap<String, String>;

/// Accumulates field validation failures for a single input.
///
/// Only the first failure recorded for a field is kept; later failures on
/// the same field are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    ///
    /// # Arguments
    /// * `ok` - Outcome of the rule being checked
    /// * `field` - Input field the rule applies to
    /// * `message` - Human readable failure description
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// True when no field has a recorded error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded errors keyed by field.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, returning its errors.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validator_is_valid() {
        let validator = Validator::new();
        assert!(validator.is_valid());
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_passing_check_records_nothing() {
        let mut validator = Validator::new();
        validator.check(true, "email", "must be provided");
        assert!(validator.is_valid());
    }

    #[test]
    fn test_first_failure_per_field_wins() {
        let mut validator = Validator::new();
        validator.check(false, "password", "must be provided");
        validator.check(false, "password", "must be at least 8 bytes long");

        assert!(!validator.is_valid());
        assert_eq!(validator.errors().len(), 1);
        assert_eq!(
            validator.errors().get("password").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn test_failures_on_distinct_fields_are_all_kept() {
        let mut validator = Validator::new();
        validator.check(false, "email", "must be provided");
        validator.check(false, "password", "must be provided");

        assert_eq!(validator.errors().len(), 2);
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut validator = Validator::new();
        validator.add_error("token", "must be 26 bytes long");

        let json = serde_json::to_value(&validator).unwrap();
        assert_eq!(json, serde_json::json!({ "token": "must be 26 bytes long" }));
    }
}
