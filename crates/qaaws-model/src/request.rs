//! Request classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation used when the caller names neither a list nor an action.
pub const DEFAULT_OPERATION: &str = "run_query_as_a_service";

/// Response element of [`DEFAULT_OPERATION`].
pub const DEFAULT_RESPONSE_ELEMENT: &str = "run_query_as_a_service_response";

/// The three request shapes the service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// List-of-values lookup for a prompt.
    ListOfValues,
    /// Caller-named SOAP action returning a header/row/cell table.
    CustomAction,
    /// Query-as-a-service run with self-describing rows.
    DefaultQuery,
}

impl RequestKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ListOfValues => "lov",
            Self::CustomAction => "custom_soap_action",
            Self::DefaultQuery => "run_qaas",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a request resolves to: its kind, the operation to invoke and the
/// element its response is nested under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub kind: RequestKind,
    pub operation: String,
    pub response_element: String,
}

impl RequestTarget {
    /// Target for a list-of-values lookup on `list_name`.
    #[must_use]
    pub fn list_of_values(list_name: &str) -> Self {
        Self {
            kind: RequestKind::ListOfValues,
            operation: format!("values_of_{list_name}"),
            response_element: format!("values_of_{list_name}_response"),
        }
    }

    /// Target for an explicitly named SOAP action.
    #[must_use]
    pub fn custom_action(action: &str) -> Self {
        Self {
            kind: RequestKind::CustomAction,
            operation: action.to_string(),
            response_element: format!("{action}_response"),
        }
    }

    /// Target for the default query-as-a-service run.
    #[must_use]
    pub fn default_query() -> Self {
        Self {
            kind: RequestKind::DefaultQuery,
            operation: DEFAULT_OPERATION.to_string(),
            response_element: DEFAULT_RESPONSE_ELEMENT.to_string(),
        }
    }
}
