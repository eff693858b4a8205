//! Generic custom fields: field definitions, field options, and the per-field
//! configuration inside a field schema.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{
    check_data_type, check_value, report, response_bool, response_object, response_opt_str,
    response_str, state_value, wire_value, ResourceState,
};
use crate::datatype::DataType;
use crate::diagnostic::Diagnostic;
use crate::error::FieldError;

/// A custom field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldConfig {
    /// The API name of the field.
    pub name: String,
    /// The human-readable name of the field.
    pub display_name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The type of the field's values.
    pub datatype: DataType,
    /// Whether the field holds an array of values.
    #[serde(default)]
    pub multi_value: bool,
    /// Whether values must be chosen from the field's options.
    #[serde(default)]
    pub fixed_options: bool,
}

impl CustomFieldConfig {
    /// Check the field definition.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        check_data_type(&self.datatype, "datatype", true, &mut diagnostics);
        report("custom_field", diagnostics)
    }

    /// Build the create/update request body.
    pub fn build(&self) -> Result<Value, FieldError> {
        debug!(field = %self.name, datatype = %self.datatype, "building custom field");
        Ok(json!({
            "field": {
                "name": self.name,
                "display_name": self.display_name,
                "description": self.description,
                "datatype": self.datatype,
                "multi_value": self.multi_value,
                "fixed_options": self.fixed_options,
            }
        }))
    }

    /// Read a field definition from an API response.
    pub fn flatten(response: &Value) -> Result<ResourceState<Self>, FieldError> {
        let field = response_object(response, "field")?;
        let config = Self {
            name: response_str(field, "name")?,
            display_name: response_str(field, "display_name")?,
            description: response_opt_str(field, "description"),
            datatype: DataType::resolve(&response_str(field, "datatype")?),
            multi_value: response_bool(field, "multi_value"),
            fixed_options: response_bool(field, "fixed_options"),
        };
        Ok(ResourceState {
            id: response_str(field, "id")?,
            config,
        })
    }
}

/// One permissible value of a fixed-options custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldOptionConfig {
    /// Id of the field the option belongs to.
    pub field: String,
    /// The type of the option's value.
    pub datatype: DataType,
    /// The option's value as configured.
    pub value: String,
}

impl CustomFieldOptionConfig {
    /// Check the option's data type and value.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        check_data_type(&self.datatype, "datatype", false, &mut diagnostics);

        let on_invalid = || {
            FieldError::InvalidValue(format!(
                "field option value {:?} is not a valid {}",
                self.value, self.datatype
            ))
        };
        check_value(
            &self.value,
            &self.datatype,
            false,
            "value",
            &on_invalid,
            &mut diagnostics,
        );
        report("custom_field_option", diagnostics)
    }

    /// Build the create request body.
    pub fn build(&self) -> Result<Value, FieldError> {
        debug!(field = %self.field, datatype = %self.datatype, "building custom field option");
        Ok(json!({
            "field_option": {
                "data": {
                    "datatype": self.datatype,
                    "value": wire_value(&self.value, &self.datatype, false)?,
                }
            }
        }))
    }

    /// Read an option of `field` from an API response.
    pub fn flatten(field: &str, response: &Value) -> Result<ResourceState<Self>, FieldError> {
        let option = response_object(response, "field_option")?;
        let data = response_object(option, "data")?;
        let datatype = DataType::resolve(&response_str(data, "datatype")?);
        let value = data
            .get("value")
            .ok_or_else(|| FieldError::MalformedResponse("missing option value".to_string()))?;

        let config = Self {
            field: field.to_string(),
            value: state_value(value, &datatype, false)?,
            datatype,
        };
        Ok(ResourceState {
            id: response_str(option, "id")?,
            config,
        })
    }
}

/// The default value of a field inside a field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValueConfig {
    /// The type of the default value. May be `field_option`.
    pub datatype: DataType,
    /// Whether the default is an array.
    #[serde(default)]
    pub multi_value: bool,
    /// The default as configured.
    pub value: String,
}

/// How a field behaves inside a field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfigurationConfig {
    /// Id of the field schema.
    pub schema: String,
    /// Id of the field.
    pub field: String,
    /// Whether incidents must carry a value for the field.
    #[serde(default)]
    pub required: bool,
    /// Value used when none is supplied. Mandatory for required fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValueConfig>,
}

impl FieldConfigurationConfig {
    /// Check the default value policy.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let default = match &self.default_value {
            Some(default) => default,
            None => {
                if self.required {
                    diagnostics.push(
                        Diagnostic::error("Missing default value")
                            .with_detail("a default_value is required when required is true")
                            .with_attribute("default_value"),
                    );
                }
                return report("field_configuration", diagnostics);
            },
        };

        if self.required && default.value.is_empty() {
            diagnostics.push(
                Diagnostic::error("Missing default value")
                    .with_detail("a required field needs a non-empty default value")
                    .with_attribute("default_value.value"),
            );
            return report("field_configuration", diagnostics);
        }

        check_data_type(
            &default.datatype,
            "default_value.datatype",
            false,
            &mut diagnostics,
        );
        let on_invalid = || {
            let shape = if default.multi_value { " array" } else { "" };
            FieldError::InvalidValue(format!(
                "default value {:?} for field {} is not a valid {}{}",
                default.value, self.field, default.datatype, shape
            ))
        };
        check_value(
            &default.value,
            &default.datatype,
            default.multi_value,
            "default_value.value",
            &on_invalid,
            &mut diagnostics,
        );
        report("field_configuration", diagnostics)
    }

    /// Build the create/update request body.
    pub fn build(&self) -> Result<Value, FieldError> {
        debug!(schema = %self.schema, field = %self.field, "building field configuration");
        let default_value = match &self.default_value {
            Some(default) => json!({
                "datatype": default.datatype,
                "multi_value": default.multi_value,
                "value": wire_value(&default.value, &default.datatype, default.multi_value)?,
            }),
            None => Value::Null,
        };
        Ok(json!({
            "field_configuration": {
                "field": {"id": self.field, "type": "field_reference"},
                "required": self.required,
                "default_value": default_value,
            }
        }))
    }

    /// Read a field configuration of `schema` from an API response.
    pub fn flatten(schema: &str, response: &Value) -> Result<ResourceState<Self>, FieldError> {
        let configuration = response_object(response, "field_configuration")?;
        let field = response_object(configuration, "field")?;

        let default_value = match configuration.get("default_value") {
            Some(default) if default.is_object() => {
                let datatype = DataType::resolve(&response_str(default, "datatype")?);
                let multi_value = response_bool(default, "multi_value");
                let value = default.get("value").ok_or_else(|| {
                    FieldError::MalformedResponse("missing default value".to_string())
                })?;
                Some(DefaultValueConfig {
                    value: state_value(value, &datatype, multi_value)?,
                    datatype,
                    multi_value,
                })
            },
            _ => None,
        };

        let config = Self {
            schema: schema.to_string(),
            field: response_str(field, "id")?,
            required: response_bool(configuration, "required"),
            default_value,
        };
        Ok(ResourceState {
            id: response_str(configuration, "id")?,
            config,
        })
    }
}
