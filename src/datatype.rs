//! The data type registry.
//!
//! Resolving a data type name never fails: unrecognized names produce
//! [`DataType::Unknown`], so callers can report a diagnostic instead of
//! aborting configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::ScalarKind;

/// The declared data type of a custom field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    /// Free-form text.
    String,
    /// A 64-bit signed integer.
    Integer,
    /// A 64-bit floating point number.
    Float,
    /// `true` or `false`.
    Boolean,
    /// An RFC 3339 timestamp, carried as a string.
    DateTime,
    /// An absolute url, carried as a string.
    Url,
    /// A reference to a field option. Only valid for option and default values.
    FieldOption,
    /// A name outside the registry.
    Unknown(String),
}

impl DataType {
    /// Resolve a wire name into a data type.
    pub fn resolve(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "datetime" => Self::DateTime,
            "url" => Self::Url,
            "field_option" => Self::FieldOption,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire name of this data type.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Url => "url",
            Self::FieldOption => "field_option",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this data type is part of the registry.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Whether a field may declare this data type for its own values.
    pub fn is_allowed_on_field(&self) -> bool {
        !matches!(self, Self::FieldOption)
    }

    /// The runtime scalar kind values of this type parse into.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::String | Self::DateTime | Self::Url | Self::FieldOption => {
                Some(ScalarKind::String)
            },
            Self::Integer => Some(ScalarKind::Integer),
            Self::Float => Some(ScalarKind::Float),
            Self::Boolean => Some(ScalarKind::Boolean),
            Self::Unknown(_) => None,
        }
    }
}

impl From<&str> for DataType {
    fn from(name: &str) -> Self {
        Self::resolve(name)
    }
}

impl From<String> for DataType {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.name().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an incident custom field holds its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// One value of any form.
    SingleValue,
    /// One value chosen from the field's options.
    SingleValueFixed,
    /// An array of values.
    MultiValue,
    /// An array of values chosen from the field's options.
    MultiValueFixed,
    /// A name outside the known field types.
    Unknown(String),
}

impl FieldType {
    /// Resolve a wire name into a field type.
    pub fn resolve(name: &str) -> Self {
        match name {
            "single_value" => Self::SingleValue,
            "single_value_fixed" => Self::SingleValueFixed,
            "multi_value" => Self::MultiValue,
            "multi_value_fixed" => Self::MultiValueFixed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire name of this field type.
    pub fn name(&self) -> &str {
        match self {
            Self::SingleValue => "single_value",
            Self::SingleValueFixed => "single_value_fixed",
            Self::MultiValue => "multi_value",
            Self::MultiValueFixed => "multi_value_fixed",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this field type is known.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Whether values of this field type are arrays.
    pub fn is_multi_value(&self) -> bool {
        matches!(self, Self::MultiValue | Self::MultiValueFixed)
    }

    /// Whether values must come from a fixed set of options.
    pub fn has_fixed_options(&self) -> bool {
        matches!(self, Self::SingleValueFixed | Self::MultiValueFixed)
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.name().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two families of custom fields sharing the value engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFamily {
    /// Custom fields grouped into field schemas.
    Generic,
    /// Custom fields attached directly to incidents.
    Incident,
}

impl FieldFamily {
    /// Resolve a data type name as this family understands it.
    ///
    /// The `field_option` marker only exists for generic custom fields.
    pub fn resolve_data_type(self, name: &str) -> DataType {
        match (self, DataType::resolve(name)) {
            (Self::Incident, DataType::FieldOption) => DataType::Unknown(name.to_string()),
            (_, data_type) => data_type,
        }
    }
}
