//! Hemmer Incident Fields
//!
//! Typed custom-field values for Hemmer providers targeting
//! incident-management APIs.
//!
//! # Overview
//!
//! Custom field values are always configured as strings. This crate turns
//! them into typed values for the remote API, validates them against a
//! declared data type, and renders API values back into their canonical
//! strings for state:
//!
//! - **Data types**: [`DataType`] resolves any name, known or not
//! - **Parsing**: [`parse_value`] reads scalars and JSON arrays
//! - **Validation**: [`validate_value`] checks runtime kinds and datetime/url formats
//! - **Flattening**: [`flatten_value`] renders typed values back to strings
//! - **Resources**: generic and incident custom field configurations built on the above
//! - **Logging**: Integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```
//! use hemmer_incident_fields::{flatten_value, parse_value, validate_value, DataType, FieldError};
//!
//! let on_invalid = || FieldError::InvalidValue("default value for severity is invalid".into());
//! validate_value("[5, 6]", &DataType::Integer, true, &on_invalid).unwrap();
//!
//! let typed = parse_value("[5, 6]", &DataType::Integer, true).unwrap();
//! assert_eq!(flatten_value(&typed, true).unwrap(), "[5,6]");
//! ```
//!
//! # Multi-value Encoding
//!
//! Multi-value fields are JSON arrays of scalars, both in configuration
//! (`["a","b"]`) and on the wire. Integer arrays decode as generic numbers
//! and are rounded to integers; single integer values must be strict
//! integer literals.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datatype;
pub mod diagnostic;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod parse;
pub mod resources;
pub mod testing;
pub mod validate;
pub mod value;

// Re-export main types at crate root
pub use datatype::{DataType, FieldFamily, FieldType};
pub use diagnostic::{Diagnostic, DiagnosticSeverity};
pub use error::{FieldError, ValueContext};
pub use flatten::flatten_value;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use parse::parse_value;
pub use validate::{validate_value, ErrorFactory};
pub use value::{Scalar, ScalarKind, TypedValue};

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
