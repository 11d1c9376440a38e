//! Request classification.

use qaaws_model::RequestTarget;
use tracing::debug;

use crate::options::RequestOptions;

/// Decide which operation serves `options` and where its answer lives.
///
/// A list name wins over an action name; with neither, the default query
/// runs.
#[must_use]
pub fn classify(options: &RequestOptions) -> RequestTarget {
    let target = if let Some(list_name) = &options.lov {
        RequestTarget::list_of_values(list_name)
    } else if let Some(action) = &options.soap_action {
        RequestTarget::custom_action(action)
    } else {
        RequestTarget::default_query()
    };
    debug!(kind = %target.kind, operation = %target.operation, "classified request");
    target
}

#[cfg(test)]
mod tests {
    use qaaws_model::{DEFAULT_OPERATION, DEFAULT_RESPONSE_ELEMENT, RequestKind};

    use super::*;

    #[test]
    fn test_list_of_values() {
        let target = classify(&RequestOptions::new().lov("teams").soap_action("ignored"));
        assert_eq!(target.kind, RequestKind::ListOfValues);
        assert_eq!(target.operation, "values_of_teams");
        assert_eq!(target.response_element, "values_of_teams_response");
    }

    #[test]
    fn test_custom_action() {
        let target = classify(&RequestOptions::new().soap_action("top_scorers"));
        assert_eq!(target.kind, RequestKind::CustomAction);
        assert_eq!(target.operation, "top_scorers");
        assert_eq!(target.response_element, "top_scorers_response");
    }

    #[test]
    fn test_default_query() {
        let target = classify(&RequestOptions::new().param("Team", "Mets"));
        assert_eq!(target.kind, RequestKind::DefaultQuery);
        assert_eq!(target.operation, DEFAULT_OPERATION);
        assert_eq!(target.response_element, DEFAULT_RESPONSE_ELEMENT);
    }
}
