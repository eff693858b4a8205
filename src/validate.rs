//! Validation of configuration strings against a declared data type.
//!
//! Validation parses the value, checks that each parsed scalar has the
//! runtime kind the data type dictates, and applies the data type's format
//! check (RFC 3339 for datetimes, absolute urls for urls).
//!
//! Parse failures and kind mismatches are reported through a caller-supplied
//! [`ErrorFactory`], so each call site phrases its own message. Format
//! failures carry their own message.
//!
//! # Example
//!
//! ```
//! use hemmer_incident_fields::datatype::DataType;
//! use hemmer_incident_fields::error::FieldError;
//! use hemmer_incident_fields::validate::validate_value;
//!
//! let on_invalid = || FieldError::InvalidValue("default value is invalid".to_string());
//!
//! assert!(validate_value("2024-01-01T00:00:00Z", &DataType::DateTime, false, &on_invalid).is_ok());
//!
//! let err = validate_value("[1, 2]", &DataType::Boolean, true, &on_invalid).unwrap_err();
//! assert_eq!(err.to_string(), "default value is invalid");
//! ```

use chrono::DateTime;
use url::Url;

use crate::datatype::DataType;
use crate::error::{FieldError, ValueContext};
use crate::parse::parse_value;
use crate::value::{Scalar, ScalarKind, TypedValue};

/// Produces the error returned when a value does not fit its data type.
pub trait ErrorFactory {
    /// Build the error.
    fn make_error(&self) -> FieldError;
}

impl<F> ErrorFactory for F
where
    F: Fn() -> FieldError,
{
    fn make_error(&self) -> FieldError {
        self()
    }
}

type FormatCheck = fn(&str, ValueContext) -> Result<(), FieldError>;

/// Validate a raw configuration string against a data type.
///
/// Unknown data types fail with [`FieldError::UnrecognizedDataType`]. Values
/// that do not parse, or parse into the wrong kind, fail with the error built
/// by `on_invalid`. Array elements are checked in order and the first
/// failure is returned.
pub fn validate_value<F>(
    raw: &str,
    data_type: &DataType,
    multi_value: bool,
    on_invalid: &F,
) -> Result<(), FieldError>
where
    F: ErrorFactory + ?Sized,
{
    let expected = data_type
        .scalar_kind()
        .ok_or_else(|| FieldError::UnrecognizedDataType(data_type.name().to_string()))?;
    let parsed =
        parse_value(raw, data_type, multi_value).map_err(|_| on_invalid.make_error())?;
    let check = format_check(data_type);
    let context = ValueContext::from_multi_value(multi_value);

    match (multi_value, &parsed) {
        (true, TypedValue::Multi(items)) => items
            .iter()
            .try_for_each(|item| validate_scalar(item, expected, check, context, on_invalid)),
        (false, TypedValue::Single(item)) => {
            validate_scalar(item, expected, check, context, on_invalid)
        },
        _ => Err(on_invalid.make_error()),
    }
}

fn validate_scalar<F>(
    scalar: &Scalar,
    expected: ScalarKind,
    check: Option<FormatCheck>,
    context: ValueContext,
    on_invalid: &F,
) -> Result<(), FieldError>
where
    F: ErrorFactory + ?Sized,
{
    if scalar.kind() != expected {
        return Err(on_invalid.make_error());
    }
    match (check, scalar.as_str()) {
        (Some(check), Some(text)) => check(text, context),
        _ => Ok(()),
    }
}

fn format_check(data_type: &DataType) -> Option<FormatCheck> {
    match data_type {
        DataType::DateTime => Some(check_datetime),
        DataType::Url => Some(check_absolute_url),
        _ => None,
    }
}

fn check_datetime(value: &str, context: ValueContext) -> Result<(), FieldError> {
    DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|e| FieldError::InvalidDateTime {
            value: value.to_string(),
            context,
            reason: e.to_string(),
        })
}

// `Url::parse` only accepts absolute urls, so a relative path is rejected here.
fn check_absolute_url(value: &str, context: ValueContext) -> Result<(), FieldError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| FieldError::NotAbsoluteUrl {
            value: value.to_string(),
            context,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingFactory;

    fn invalid() -> FieldError {
        FieldError::InvalidValue("invalid default value".to_string())
    }

    #[test]
    fn test_valid_scalars() {
        assert!(validate_value("hello", &DataType::String, false, &invalid).is_ok());
        assert!(validate_value("5", &DataType::Integer, false, &invalid).is_ok());
        assert!(validate_value("5.4", &DataType::Float, false, &invalid).is_ok());
        assert!(validate_value("false", &DataType::Boolean, false, &invalid).is_ok());
        assert!(validate_value("PXYZ123", &DataType::FieldOption, false, &invalid).is_ok());
    }

    #[test]
    fn test_malformed_literal_uses_factory() {
        let factory = CountingFactory::new("value for priority is invalid");
        let err = validate_value("notabool", &DataType::Boolean, false, &factory).unwrap_err();
        assert_eq!(err.to_string(), "value for priority is invalid");
        assert_eq!(factory.calls(), 1);
    }

    #[test]
    fn test_datetime() {
        assert!(validate_value("2024-01-01T00:00:00Z", &DataType::DateTime, false, &invalid).is_ok());
        assert!(validate_value(
            "2024-01-01T10:30:00.123+02:00",
            &DataType::DateTime,
            false,
            &invalid
        )
        .is_ok());

        let err = validate_value("not-a-date", &DataType::DateTime, false, &invalid).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidDateTime {
                context: ValueContext::SingleValue,
                ..
            }
        ));

        // Zone is required.
        assert!(validate_value("2024-01-01T00:00:00", &DataType::DateTime, false, &invalid).is_err());
    }

    #[test]
    fn test_url() {
        assert!(validate_value("https://example.com", &DataType::Url, false, &invalid).is_ok());
        assert!(validate_value("https://example.com/a?b=c", &DataType::Url, false, &invalid).is_ok());

        let err = validate_value("/relative/path", &DataType::Url, false, &invalid).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parsed url default value \"/relative/path\" is not an absolute url"
        );
        assert!(validate_value("example.com", &DataType::Url, false, &invalid).is_err());
    }

    #[test]
    fn test_multi_value_elements() {
        assert!(validate_value("[5, 6]", &DataType::Integer, true, &invalid).is_ok());
        assert!(validate_value("[5.4, 6.7]", &DataType::Float, true, &invalid).is_ok());
        assert!(validate_value(r#"["foo","bar"]"#, &DataType::String, true, &invalid).is_ok());
        assert!(validate_value("[true, false]", &DataType::Boolean, true, &invalid).is_ok());
        assert!(validate_value("[]", &DataType::Url, true, &invalid).is_ok());

        let err = validate_value(r#"["foo", 5]"#, &DataType::String, true, &invalid).unwrap_err();
        assert_eq!(err.to_string(), "invalid default value");

        let err = validate_value(r#"[true, "x"]"#, &DataType::Boolean, true, &invalid).unwrap_err();
        assert_eq!(err.to_string(), "invalid default value");
    }

    #[test]
    fn test_multi_value_format_checks() {
        assert!(validate_value(
            r#"["https://example.com", "https://example.org"]"#,
            &DataType::Url,
            true,
            &invalid
        )
        .is_ok());

        let err = validate_value(
            r#"["https://example.com", "/relative"]"#,
            &DataType::Url,
            true,
            &invalid,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FieldError::NotAbsoluteUrl {
                context: ValueContext::MultiValueElement,
                ..
            }
        ));

        let err = validate_value(r#"["2024-01-01"]"#, &DataType::DateTime, true, &invalid).unwrap_err();
        assert!(matches!(err, FieldError::InvalidDateTime { .. }));
    }

    #[test]
    fn test_short_circuits_on_first_failure() {
        let factory = CountingFactory::new("bad element");
        let err = validate_value(r#"["a", 1, 2, 3]"#, &DataType::String, true, &factory).unwrap_err();
        assert_eq!(err.to_string(), "bad element");
        assert_eq!(factory.calls(), 1);
    }

    #[test]
    fn test_non_array_multi_value_uses_factory() {
        let factory = CountingFactory::new("not an array");
        assert!(validate_value("5", &DataType::Integer, true, &factory).is_err());
        assert_eq!(factory.calls(), 1);
    }

    #[test]
    fn test_unknown_data_type() {
        let factory = CountingFactory::new("unused");
        let err = validate_value("5", &DataType::resolve("money"), false, &factory).unwrap_err();
        assert!(matches!(err, FieldError::UnrecognizedDataType(_)));
        assert_eq!(factory.calls(), 0);
    }

    #[test]
    fn test_idempotent() {
        let first = validate_value("/relative", &DataType::Url, false, &invalid).map_err(|e| e.to_string());
        let second = validate_value("/relative", &DataType::Url, false, &invalid).map_err(|e| e.to_string());
        assert_eq!(first, second);
    }

    #[test]
    fn test_boxed_factory() {
        let factory: Box<dyn ErrorFactory> = Box::new(invalid);
        assert!(validate_value("x", &DataType::Integer, false, factory.as_ref()).is_err());
    }
}
