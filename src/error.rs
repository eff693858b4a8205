//! Error types for custom-field values.

use thiserror::Error;

/// Errors produced while parsing, validating or flattening custom-field values.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The data type name is not part of the registry.
    #[error("Unrecognized datatype {0}")]
    UnrecognizedDataType(String),

    /// A scalar literal could not be parsed as the expected native type.
    #[error("value {value:?} is not a valid {data_type} literal: {reason}")]
    MalformedLiteral {
        /// The raw input.
        value: String,
        /// Name of the data type the value was parsed for.
        data_type: String,
        /// The underlying parser message.
        reason: String,
    },

    /// A multi-value input is not a JSON array.
    #[error("malformed array value: {0}")]
    MalformedArray(#[from] serde_json::Error),

    /// An integer array element is not a number.
    #[error("value {0} not parseable as a number")]
    NotANumber(String),

    /// An array element is not one of the supported scalar kinds.
    #[error("value {0} is not a scalar")]
    NotAScalar(String),

    /// A value was rejected; the message is phrased by the caller.
    #[error("{0}")]
    InvalidValue(String),

    /// A datetime value is not an RFC 3339 timestamp.
    #[error("parsed datetime {context} {value:?} is not a valid RFC 3339 timestamp: {reason}")]
    InvalidDateTime {
        /// The offending value.
        value: String,
        /// Whether this was a single value or an array element.
        context: ValueContext,
        /// The underlying parser message.
        reason: String,
    },

    /// A url value is not an absolute url.
    #[error("parsed url {context} {value:?} is not an absolute url")]
    NotAbsoluteUrl {
        /// The offending value.
        value: String,
        /// Whether this was a single value or an array element.
        context: ValueContext,
    },

    /// A value cannot be written in the wire encoding.
    #[error("value {0} cannot be encoded")]
    NotEncodable(String),

    /// The value's shape disagrees with the multi-value flag.
    #[error("expected a {expected} value, got a {actual} value")]
    ShapeMismatch {
        /// The shape the caller declared.
        expected: &'static str,
        /// The shape of the value passed in.
        actual: &'static str,
    },

    /// A resource configuration could not be read.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// A remote API response is missing an expected attribute.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

impl FieldError {
    pub(crate) fn shape_mismatch(multi_value: bool) -> Self {
        if multi_value {
            Self::ShapeMismatch {
                expected: "multi",
                actual: "single",
            }
        } else {
            Self::ShapeMismatch {
                expected: "single",
                actual: "multi",
            }
        }
    }
}

/// Where a semantically invalid value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueContext {
    /// The value is the whole (single) default value.
    SingleValue,
    /// The value is one element of a multi-value array.
    MultiValueElement,
}

impl ValueContext {
    pub(crate) fn from_multi_value(multi_value: bool) -> Self {
        if multi_value {
            Self::MultiValueElement
        } else {
            Self::SingleValue
        }
    }
}

impl std::fmt::Display for ValueContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleValue => f.write_str("default value"),
            Self::MultiValueElement => f.write_str("default value element"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldError::UnrecognizedDataType("money".to_string());
        assert_eq!(format!("{}", err), "Unrecognized datatype money");

        let err = FieldError::NotANumber("\"a\"".to_string());
        assert_eq!(format!("{}", err), "value \"a\" not parseable as a number");

        let err = FieldError::InvalidValue("field option value is invalid".to_string());
        assert_eq!(format!("{}", err), "field option value is invalid");
    }

    #[test]
    fn test_url_error_names_context() {
        let err = FieldError::NotAbsoluteUrl {
            value: "/relative".to_string(),
            context: ValueContext::SingleValue,
        };
        assert_eq!(
            format!("{}", err),
            "parsed url default value \"/relative\" is not an absolute url"
        );

        let err = FieldError::NotAbsoluteUrl {
            value: "/relative".to_string(),
            context: ValueContext::MultiValueElement,
        };
        assert!(format!("{}", err).contains("default value element"));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = FieldError::shape_mismatch(true);
        assert_eq!(format!("{}", err), "expected a multi value, got a single value");

        let err = FieldError::shape_mismatch(false);
        assert_eq!(format!("{}", err), "expected a single value, got a multi value");
    }

    #[test]
    fn test_malformed_array_from_serde() {
        let serde_err = serde_json::from_str::<Vec<serde_json::Value>>("[1,").unwrap_err();
        let err: FieldError = serde_err.into();
        assert!(matches!(err, FieldError::MalformedArray(_)));
        assert!(format!("{}", err).starts_with("malformed array value"));
    }
}
