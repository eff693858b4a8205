//! Rendering typed values back into their configuration strings.

use crate::error::FieldError;
use crate::value::TypedValue;

/// Render a typed value as the string stored in configuration and state.
///
/// Multi-values are written as compact JSON arrays, which [`crate::parse::parse_value`]
/// reads back. Single values use their plain textual form and never fail.
///
/// # Example
///
/// ```
/// use hemmer_incident_fields::flatten::flatten_value;
/// use hemmer_incident_fields::value::{Scalar, TypedValue};
///
/// let value = TypedValue::Multi(vec![Scalar::Integer(5), Scalar::Integer(6)]);
/// assert_eq!(flatten_value(&value, true).unwrap(), "[5,6]");
///
/// let value = TypedValue::Single(Scalar::Float(5.4));
/// assert_eq!(flatten_value(&value, false).unwrap(), "5.4");
/// ```
pub fn flatten_value(value: &TypedValue, multi_value: bool) -> Result<String, FieldError> {
    if value.is_multi() != multi_value {
        return Err(FieldError::shape_mismatch(multi_value));
    }
    match value {
        TypedValue::Single(scalar) => Ok(scalar.to_string()),
        TypedValue::Multi(_) => serde_json::to_string(&value.to_json()?)
            .map_err(|e| FieldError::NotEncodable(e.to_string())),
    }
}
