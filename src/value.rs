//! Runtime representation of custom field values.
//!
//! Values are a small closed set of scalar kinds. Datetime and url values
//! are strings; their format is checked by [`crate::validate`].

use serde_json::Value;
use std::fmt;

use crate::datatype::DataType;
use crate::error::FieldError;

/// The runtime kind of a [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 text.
    String,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit floating point number.
    Float,
    /// Boolean.
    Boolean,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        })
    }
}

/// A single typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text, including datetime and url values.
    String(String),
    /// An integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Boolean(bool),
}

impl Scalar {
    /// The runtime kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::String(_) => ScalarKind::String,
            Self::Integer(_) => ScalarKind::Integer,
            Self::Float(_) => ScalarKind::Float,
            Self::Boolean(_) => ScalarKind::Boolean,
        }
    }

    /// The text of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Decode a JSON scalar without regard to a data type.
    ///
    /// Numbers always become [`Scalar::Float`].
    pub fn from_json(value: &Value) -> Result<Self, FieldError> {
        match value {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Number(n) => n
                .as_f64()
                .map(Self::Float)
                .ok_or_else(|| FieldError::NotANumber(n.to_string())),
            other => Err(FieldError::NotAScalar(other.to_string())),
        }
    }

    /// Decode a JSON number as an integer, rounding to the nearest value.
    pub fn integer_from_json(value: &Value) -> Result<Self, FieldError> {
        let Value::Number(n) = value else {
            return Err(FieldError::NotANumber(value.to_string()));
        };
        if let Some(i) = n.as_i64() {
            return Ok(Self::Integer(i));
        }
        match n.as_f64().map(f64::round) {
            Some(f) if fits_i64(f) => Ok(Self::Integer(f as i64)),
            _ => Err(FieldError::NotANumber(n.to_string())),
        }
    }

    /// Encode this scalar as a native JSON value.
    pub fn to_json(&self) -> Result<Value, FieldError> {
        match self {
            Self::String(s) => Ok(Value::String(s.clone())),
            Self::Integer(i) => Ok(Value::from(*i)),
            // Integral floats are written like their `Display` form (`5`, not `5.0`).
            Self::Float(f) if f.fract() == 0.0 && fits_i64(*f) => Ok(Value::from(*f as i64)),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| FieldError::NotEncodable(f.to_string())),
            Self::Boolean(b) => Ok(Value::Bool(*b)),
        }
    }
}

// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn fits_i64(f: f64) -> bool {
    f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// A single scalar or an ordered array of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// A single value.
    Single(Scalar),
    /// A multi-value array.
    Multi(Vec<Scalar>),
}

impl TypedValue {
    /// Whether this is a multi-value array.
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Encode this value the way the remote API expects it.
    ///
    /// Single values become native JSON scalars, multi-values JSON arrays.
    pub fn to_json(&self) -> Result<Value, FieldError> {
        match self {
            Self::Single(scalar) => scalar.to_json(),
            Self::Multi(items) => items
                .iter()
                .map(Scalar::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    /// Decode a value received from the remote API.
    ///
    /// Numbers arrive as generic JSON numbers; for integer fields they are
    /// rounded to the nearest integer.
    pub fn from_json(
        value: &Value,
        data_type: &DataType,
        multi_value: bool,
    ) -> Result<Self, FieldError> {
        if !data_type.is_known() {
            return Err(FieldError::UnrecognizedDataType(data_type.name().to_string()));
        }
        let decode = |element: &Value| match data_type {
            DataType::Integer => Scalar::integer_from_json(element),
            _ => Scalar::from_json(element),
        };
        match (multi_value, value) {
            (true, Value::Array(items)) => items
                .iter()
                .map(decode)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Multi),
            (true, _) => Err(FieldError::shape_mismatch(true)),
            (false, Value::Array(_)) => Err(FieldError::shape_mismatch(false)),
            (false, scalar) => decode(scalar).map(Self::Single),
        }
    }
}
