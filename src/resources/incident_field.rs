//! Incident custom fields and their options.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{
    check_data_type, check_value, report, response_object, response_opt_str, response_str,
    state_value, wire_value, ResourceState,
};
use crate::datatype::{DataType, FieldFamily, FieldType};
use crate::diagnostic::Diagnostic;
use crate::error::FieldError;

const FAMILY: FieldFamily = FieldFamily::Incident;

/// An incident custom field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentCustomFieldConfig {
    /// The API name of the field.
    pub name: String,
    /// The human-readable name of the field.
    pub display_name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The type of the field's values.
    pub data_type: DataType,
    /// Whether the field holds one value or an array, free-form or fixed.
    pub field_type: FieldType,
    /// Value used when none is supplied; a JSON array for multi-value fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl IncidentCustomFieldConfig {
    /// Check the field definition and its default value.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let data_type = FAMILY.resolve_data_type(self.data_type.name());
        check_data_type(&data_type, "data_type", true, &mut diagnostics);

        if !self.field_type.is_known() {
            diagnostics.push(
                Diagnostic::error(format!("Unknown field_type {}", self.field_type))
                    .with_detail(
                        "field_type must be one of single_value, single_value_fixed, \
                         multi_value, multi_value_fixed",
                    )
                    .with_attribute("field_type"),
            );
            return report("incident_custom_field", diagnostics);
        }

        if let Some(default_value) = &self.default_value {
            let on_invalid = || {
                FieldError::InvalidValue(format!(
                    "default_value {:?} is not valid for a {} field of data_type {}",
                    default_value, self.field_type, self.data_type
                ))
            };
            check_value(
                default_value,
                &data_type,
                self.field_type.is_multi_value(),
                "default_value",
                &on_invalid,
                &mut diagnostics,
            );
        }
        report("incident_custom_field", diagnostics)
    }

    /// Build the create/update request body.
    pub fn build(&self) -> Result<Value, FieldError> {
        debug!(
            field = %self.name,
            data_type = %self.data_type,
            field_type = %self.field_type,
            "building incident custom field"
        );
        let default_value = match &self.default_value {
            Some(raw) => wire_value(raw, &self.data_type, self.field_type.is_multi_value())?,
            None => Value::Null,
        };
        Ok(json!({
            "field": {
                "name": self.name,
                "display_name": self.display_name,
                "description": self.description,
                "data_type": self.data_type,
                "field_type": self.field_type,
                "default_value": default_value,
            }
        }))
    }

    /// Read a field definition from an API response.
    pub fn flatten(response: &Value) -> Result<ResourceState<Self>, FieldError> {
        let field = response_object(response, "field")?;
        let data_type = FAMILY.resolve_data_type(&response_str(field, "data_type")?);
        let field_type = FieldType::resolve(&response_str(field, "field_type")?);

        let default_value = match field.get("default_value") {
            None | Some(Value::Null) => None,
            Some(value) => Some(state_value(value, &data_type, field_type.is_multi_value())?),
        };

        let config = Self {
            name: response_str(field, "name")?,
            display_name: response_str(field, "display_name")?,
            description: response_opt_str(field, "description"),
            data_type,
            field_type,
            default_value,
        };
        Ok(ResourceState {
            id: response_str(field, "id")?,
            config,
        })
    }
}

/// One permissible value of a fixed incident custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentCustomFieldOptionConfig {
    /// Id of the field the option belongs to.
    pub field: String,
    /// The type of the option's value.
    pub data_type: DataType,
    /// The option's value as configured.
    pub value: String,
}

impl IncidentCustomFieldOptionConfig {
    /// Check the option's data type and value.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let data_type = FAMILY.resolve_data_type(self.data_type.name());
        check_data_type(&data_type, "data_type", true, &mut diagnostics);

        let on_invalid = || {
            FieldError::InvalidValue(format!(
                "invalid value {:?} for option of data_type {}",
                self.value, self.data_type
            ))
        };
        check_value(
            &self.value,
            &data_type,
            false,
            "value",
            &on_invalid,
            &mut diagnostics,
        );
        report("incident_custom_field_option", diagnostics)
    }

    /// Build the create request body.
    pub fn build(&self) -> Result<Value, FieldError> {
        debug!(field = %self.field, data_type = %self.data_type, "building incident field option");
        Ok(json!({
            "field_option": {
                "data": {
                    "data_type": self.data_type,
                    "value": wire_value(&self.value, &self.data_type, false)?,
                }
            }
        }))
    }

    /// Read an option of `field` from an API response.
    pub fn flatten(field: &str, response: &Value) -> Result<ResourceState<Self>, FieldError> {
        let option = response_object(response, "field_option")?;
        let data = response_object(option, "data")?;
        let data_type = FAMILY.resolve_data_type(&response_str(data, "data_type")?);
        let value = data
            .get("value")
            .ok_or_else(|| FieldError::MalformedResponse("missing option value".to_string()))?;

        let config = Self {
            field: field.to_string(),
            value: state_value(value, &data_type, false)?,
            data_type,
        };
        Ok(ResourceState {
            id: response_str(option, "id")?,
            config,
        })
    }
}
