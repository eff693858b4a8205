//! Custom field resources built on the value engine.
//!
//! Each resource configuration is read from the user's configuration object,
//! validated into [`Diagnostic`]s, built into a remote API payload and
//! flattened back from an API response. Both field families call the same
//! engine; they differ only in how they phrase rejected values.

pub mod custom_field;
pub mod incident_field;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::datatype::DataType;
use crate::diagnostic::{is_valid, Diagnostic};
use crate::error::FieldError;
use crate::flatten::flatten_value;
use crate::parse::parse_value;
use crate::validate::{validate_value, ErrorFactory};
use crate::value::TypedValue;

pub use custom_field::{
    CustomFieldConfig, CustomFieldOptionConfig, DefaultValueConfig, FieldConfigurationConfig,
};
pub use incident_field::{IncidentCustomFieldConfig, IncidentCustomFieldOptionConfig};

/// A resource configuration together with the id the remote API assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    /// The remote id.
    pub id: String,
    /// The flattened configuration.
    pub config: T,
}

/// Read a typed configuration from a configuration object.
pub fn from_config<T: DeserializeOwned>(config: Value) -> Result<T, FieldError> {
    serde_json::from_value(config).map_err(|e| FieldError::InvalidConfig(e.to_string()))
}

/// Report a data type that is unknown, or not allowed as a field's own type.
pub(crate) fn check_data_type(
    data_type: &DataType,
    attribute: &str,
    on_field: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if !data_type.is_known() {
        diagnostics.push(
            Diagnostic::from_field_error(&FieldError::UnrecognizedDataType(
                data_type.name().to_string(),
            ))
            .with_attribute(attribute),
        );
    } else if on_field && !data_type.is_allowed_on_field() {
        diagnostics.push(
            Diagnostic::error(format!("Datatype {} is not allowed on a field", data_type))
                .with_detail("field_option may only be used for option and default values")
                .with_attribute(attribute),
        );
    }
}

/// Log a rejected configuration and hand its diagnostics back.
pub(crate) fn report(resource: &str, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    if !is_valid(&diagnostics) {
        warn!(
            resource,
            diagnostics = diagnostics.len(),
            "configuration rejected"
        );
    }
    diagnostics
}

/// Run the value engine on a configured value and record any failure.
pub(crate) fn check_value<F>(
    raw: &str,
    data_type: &DataType,
    multi_value: bool,
    attribute: &str,
    on_invalid: &F,
    diagnostics: &mut Vec<Diagnostic>,
) where
    F: ErrorFactory + ?Sized,
{
    // Unknown types are reported once by `check_data_type`.
    if !data_type.is_known() {
        return;
    }
    if let Err(err) = validate_value(raw, data_type, multi_value, on_invalid) {
        diagnostics.push(Diagnostic::from_field_error(&err).with_attribute(attribute));
    }
}

/// Encode a configured value for the remote API.
pub(crate) fn wire_value(
    raw: &str,
    data_type: &DataType,
    multi_value: bool,
) -> Result<Value, FieldError> {
    parse_value(raw, data_type, multi_value)?.to_json()
}

/// Decode a value from the remote API into its configuration string.
pub(crate) fn state_value(
    value: &Value,
    data_type: &DataType,
    multi_value: bool,
) -> Result<String, FieldError> {
    let typed = TypedValue::from_json(value, data_type, multi_value)?;
    flatten_value(&typed, multi_value)
}

pub(crate) fn response_object<'a>(response: &'a Value, key: &str) -> Result<&'a Value, FieldError> {
    response
        .get(key)
        .filter(|v| v.is_object())
        .ok_or_else(|| FieldError::MalformedResponse(format!("missing object '{}'", key)))
}

pub(crate) fn response_str(object: &Value, key: &str) -> Result<String, FieldError> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FieldError::MalformedResponse(format!("missing string '{}'", key)))
}

pub(crate) fn response_opt_str(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn response_bool(object: &Value, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_config_reports_missing_attribute() {
        let err = from_config::<CustomFieldOptionConfig>(json!({"field": "F1"})).unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
        assert!(err.to_string().contains("datatype"));
    }

    #[test]
    fn test_check_data_type() {
        let mut diagnostics = Vec::new();
        check_data_type(&DataType::resolve("money"), "datatype", true, &mut diagnostics);
        check_data_type(&DataType::FieldOption, "datatype", true, &mut diagnostics);
        check_data_type(&DataType::FieldOption, "datatype", false, &mut diagnostics);
        check_data_type(&DataType::String, "datatype", true, &mut diagnostics);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].summary, "Unknown datatype");
        assert!(diagnostics[1].summary.contains("not allowed on a field"));
    }

    #[test]
    fn test_report_passes_diagnostics_through() {
        assert!(report("custom_field", vec![]).is_empty());

        let warnings = report("custom_field", vec![Diagnostic::warning("heads up")]);
        assert_eq!(warnings, vec![Diagnostic::warning("heads up")]);

        let errors = vec![Diagnostic::error("Invalid value").with_attribute("value")];
        assert_eq!(report("custom_field_option", errors.clone()), errors);
    }

    #[test]
    fn test_wire_and_state_values() {
        assert_eq!(
            wire_value("[5, 6]", &DataType::Integer, true).unwrap(),
            json!([5, 6])
        );
        assert_eq!(wire_value("true", &DataType::Boolean, false).unwrap(), json!(true));
        assert_eq!(
            state_value(&json!([5.0, 6.0]), &DataType::Integer, true).unwrap(),
            "[5,6]"
        );
        assert_eq!(
            state_value(&json!([5.0, 6.0]), &DataType::Float, true).unwrap(),
            "[5,6]"
        );
        assert_eq!(state_value(&json!(5.4), &DataType::Float, false).unwrap(), "5.4");
    }

    #[test]
    fn test_response_helpers() {
        let response = json!({"field": {"id": "F1", "multi_value": true}});
        let field = response_object(&response, "field").unwrap();
        assert_eq!(response_str(field, "id").unwrap(), "F1");
        assert!(response_bool(field, "multi_value"));
        assert!(!response_bool(field, "fixed_options"));
        assert_eq!(response_opt_str(field, "description"), None);

        assert!(matches!(
            response_object(&response, "field_option"),
            Err(FieldError::MalformedResponse(_))
        ));
    }
}
