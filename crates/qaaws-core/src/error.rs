//! Error types for the report adapter.

use qaaws_soap::SoapError;
use thiserror::Error;

/// Errors surfaced by [`crate::Qaaws`] and the pieces it sequences.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaawsError {
    /// Adapter built without usable credentials or endpoint.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Service definition could not be fetched or understood.
    #[error("service definition error: {0}")]
    ServiceDefinition(String),

    /// Requested operation is not in the service definition.
    #[error(
        "SOAP action {operation} not found. \
         Set the soap_action parameter equal to one of these: {}",
        .valid.join(", ")
    )]
    UnknownOperation {
        /// Operation that was asked for.
        operation: String,
        /// Operations the service does declare.
        valid: Vec<String>,
    },

    /// Supplied parameter has no declared type.
    #[error(
        "no parameter named '{parameter}' found in service definition for {operation}. \
         All params in service definition are: {}",
        .valid.join(", ")
    )]
    UnknownParameter {
        /// Parameter that was supplied.
        parameter: String,
        /// Operation being prepared.
        operation: String,
        /// Parameters the operation declares.
        valid: Vec<String>,
    },

    /// Value could not be coerced to its declared type.
    #[error(
        "parameter {parameter} is supposed to be a dateTime but value provided, {value}, \
         is not parseable as a Date or DateTime"
    )]
    ParameterType {
        /// Parameter name.
        parameter: String,
        /// Value as supplied.
        value: String,
    },

    /// The service answered with its own error message.
    #[error("{0}")]
    ServiceReported(String),

    /// Response shape matched no known pattern.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// SOAP exchange failed (network, HTTP status or SOAP Fault).
    #[error(transparent)]
    Transport(#[from] SoapError),
}

impl QaawsError {
    /// Returns whether the message came from the service itself.
    #[must_use]
    pub fn is_service_reported(&self) -> bool {
        matches!(self, Self::ServiceReported(_))
    }

    /// Returns whether the caller can fix the failure by changing its input.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::UnknownOperation { .. }
                | Self::UnknownParameter { .. }
                | Self::ParameterType { .. }
        )
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, QaawsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parameter_lists_valid_names() {
        let err = QaawsError::UnknownParameter {
            parameter: "foo".to_string(),
            operation: "standings".to_string(),
            valid: vec!["bar".to_string(), "baz".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("'foo'"));
        assert!(message.ends_with("bar, baz"));
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_service_reported_is_verbatim() {
        let err = QaawsError::ServiceReported("Qaaws Error: No data found".to_string());
        assert_eq!(err.to_string(), "Qaaws Error: No data found");
        assert!(err.is_service_reported());
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_transport_is_transparent() {
        let err = QaawsError::from(SoapError::Network("connection refused".to_string()));
        assert_eq!(err.to_string(), "network error: connection refused");
        assert!(!err.is_caller_error());
    }
}
