//! Access to the service's declared operations.

use qaaws_model::ParameterSpec;
use qaaws_soap::Wsdl;

use crate::error::Result;

/// Source of operation parameter declarations.
pub trait SchemaProvider {
    /// Declared parameters of `operation`, or `None` if the service has no
    /// such operation.
    fn parameter_types(&self, operation: &str) -> Result<Option<ParameterSpec>>;

    /// Names of every operation the service exposes.
    fn soap_actions(&self) -> Result<Vec<String>>;
}

impl SchemaProvider for Wsdl {
    fn parameter_types(&self, operation: &str) -> Result<Option<ParameterSpec>> {
        Ok(self.operation(operation).map(|op| op.parameters.clone()))
    }

    fn soap_actions(&self) -> Result<Vec<String>> {
        Ok(self.operation_keys())
    }
}
