//! Testing utilities for code built on the value engine.
//!
//! # Example
//!
//! ```
//! use hemmer_incident_fields::datatype::DataType;
//! use hemmer_incident_fields::testing::{round_trip, CountingFactory};
//! use hemmer_incident_fields::validate::validate_value;
//!
//! assert_eq!(round_trip("[5, 6]", &DataType::Integer, true).unwrap(), "[5,6]");
//!
//! let factory = CountingFactory::new("priority is invalid");
//! assert!(validate_value("high", &DataType::Integer, false, &factory).is_err());
//! assert_eq!(factory.calls(), 1);
//! ```

use std::cell::Cell;

use crate::datatype::DataType;
use crate::diagnostic::Diagnostic;
use crate::error::FieldError;
use crate::flatten::flatten_value;
use crate::parse::parse_value;
use crate::validate::ErrorFactory;

/// An [`ErrorFactory`] that records how often it was asked for an error.
#[derive(Debug)]
pub struct CountingFactory {
    message: String,
    calls: Cell<usize>,
}

impl CountingFactory {
    /// Create a factory producing [`FieldError::InvalidValue`] with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Cell::new(0),
        }
    }

    /// Number of errors produced so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ErrorFactory for CountingFactory {
    fn make_error(&self) -> FieldError {
        self.calls.set(self.calls.get() + 1);
        FieldError::InvalidValue(self.message.clone())
    }
}

/// Parse `raw` and flatten the result again.
pub fn round_trip(raw: &str, data_type: &DataType, multi_value: bool) -> Result<String, FieldError> {
    let value = parse_value(raw, data_type, multi_value)?;
    flatten_value(&value, multi_value)
}

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there are any error diagnostics.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();

    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors
            .iter()
            .map(|d| (&d.summary, &d.detail))
            .collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if there are no error diagnostics.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics.iter().any(Diagnostic::is_error),
        "Expected at least one error, but got none"
    );
}

/// Assert that an error diagnostic's summary contains `substring`.
///
/// # Panics
///
/// Panics if no error diagnostic matches.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let found = diagnostics
        .iter()
        .any(|d| d.is_error() && d.summary.contains(substring));

    assert!(
        found,
        "Expected an error containing '{}', but no matching error found. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}
