//! Parsing configuration strings into typed values.
//!
//! Configuration always supplies values as strings. Single values are read
//! as literals of the declared type; multi-values are JSON arrays.
//!
//! # Example
//!
//! ```
//! use hemmer_incident_fields::datatype::DataType;
//! use hemmer_incident_fields::parse::parse_value;
//! use hemmer_incident_fields::value::{Scalar, TypedValue};
//!
//! let value = parse_value("[5, 6]", &DataType::Integer, true).unwrap();
//! assert_eq!(value, TypedValue::Multi(vec![Scalar::Integer(5), Scalar::Integer(6)]));
//!
//! assert!(parse_value("notabool", &DataType::Boolean, false).is_err());
//! ```

use serde_json::Value;

use crate::datatype::DataType;
use crate::error::FieldError;
use crate::value::{Scalar, ScalarKind, TypedValue};

/// Parse a raw configuration string into a typed value.
///
/// The content of datetime and url strings is not checked here; use
/// [`crate::validate::validate_value`] for that.
pub fn parse_value(
    raw: &str,
    data_type: &DataType,
    multi_value: bool,
) -> Result<TypedValue, FieldError> {
    let kind = data_type
        .scalar_kind()
        .ok_or_else(|| FieldError::UnrecognizedDataType(data_type.name().to_string()))?;

    if multi_value {
        parse_array(raw, data_type).map(TypedValue::Multi)
    } else {
        parse_scalar(raw, data_type, kind).map(TypedValue::Single)
    }
}

fn parse_scalar(raw: &str, data_type: &DataType, kind: ScalarKind) -> Result<Scalar, FieldError> {
    let malformed = |reason: String| FieldError::MalformedLiteral {
        value: raw.to_string(),
        data_type: data_type.name().to_string(),
        reason,
    };

    match kind {
        ScalarKind::Boolean => parse_bool(raw)
            .map(Scalar::Boolean)
            .ok_or_else(|| malformed("expected true or false".to_string())),
        ScalarKind::Float => match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Scalar::Float(f)),
            Ok(_) => Err(malformed("expected a finite decimal number".to_string())),
            Err(e) => Err(malformed(e.to_string())),
        },
        ScalarKind::Integer => raw
            .parse::<i64>()
            .map(Scalar::Integer)
            .map_err(|e| malformed(e.to_string())),
        ScalarKind::String => Ok(Scalar::String(raw.to_string())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_array(raw: &str, data_type: &DataType) -> Result<Vec<Scalar>, FieldError> {
    let elements: Vec<Value> = serde_json::from_str(raw)?;

    // Generic decoding yields floats for every number, so integer
    // arrays are rounded back.
    elements
        .iter()
        .map(|element| match data_type {
            DataType::Integer => Scalar::integer_from_json(element),
            _ => Scalar::from_json(element),
        })
        .collect()
}
