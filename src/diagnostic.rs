//! Diagnostics reported for custom field configuration.
//!
//! Resource validation collects every problem it finds instead of stopping
//! at the first one; each problem becomes a [`Diagnostic`] pointing at the
//! offending attribute.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// The configuration cannot be applied.
    Error,
    /// The configuration can be applied but should be fixed.
    Warning,
}

/// A problem found in a resource configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// A short summary of the issue.
    pub summary: String,
    /// A detailed description of the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The attribute the issue is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create an error diagnostic from a value engine error.
    pub fn from_field_error(err: &FieldError) -> Self {
        let summary = match err {
            FieldError::UnrecognizedDataType(_) => "Unknown datatype",
            FieldError::InvalidDateTime { .. } => "Invalid datetime value",
            FieldError::NotAbsoluteUrl { .. } => "Invalid url value",
            FieldError::InvalidConfig(_) => "Invalid configuration",
            _ => "Invalid value",
        };
        Self::error(summary).with_detail(err.to_string())
    }

    /// Add detail to this diagnostic.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the attribute path for this diagnostic.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Whether this diagnostic blocks the configuration.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

/// Whether a diagnostic list contains no errors.
pub fn is_valid(diagnostics: &[Diagnostic]) -> bool {
    !diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueContext;

    #[test]
    fn test_diagnostic_builder() {
        let err = Diagnostic::error("Invalid configuration")
            .with_detail("datatype must be set")
            .with_attribute("datatype");

        assert_eq!(err.severity, DiagnosticSeverity::Error);
        assert_eq!(err.summary, "Invalid configuration");
        assert_eq!(err.detail, Some("datatype must be set".to_string()));
        assert_eq!(err.attribute, Some("datatype".to_string()));
        assert!(err.is_error());
        assert!(!Diagnostic::warning("deprecated").is_error());
    }

    #[test]
    fn test_from_field_error() {
        let diag = Diagnostic::from_field_error(&FieldError::NotAbsoluteUrl {
            value: "/x".to_string(),
            context: ValueContext::SingleValue,
        });
        assert_eq!(diag.summary, "Invalid url value");
        assert!(diag.detail.unwrap().contains("is not an absolute url"));

        let diag =
            Diagnostic::from_field_error(&FieldError::UnrecognizedDataType("money".to_string()));
        assert_eq!(diag.summary, "Unknown datatype");
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(&[]));
        assert!(is_valid(&[Diagnostic::warning("heads up")]));
        assert!(!is_valid(&[Diagnostic::error("no")]));
    }

    #[test]
    fn test_serialized_shape() {
        let diag = Diagnostic::error("Invalid value").with_attribute("default_value.value");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["attribute"], "default_value.value");
        assert!(json.get("detail").is_none());
    }
}
