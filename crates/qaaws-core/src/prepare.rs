//! Parameter preparation: validate caller parameters against an
//! operation's declaration and coerce them for the wire.

use qaaws_model::{
    MessageValue, OutgoingMessage, ParamType, ParamValue, RequestKind, RequestTarget,
};
use tracing::{debug, trace};

use crate::coerce::{coerce_datetime, split_multi_value, wrap_lov_reference};
use crate::error::{QaawsError, Result};
use crate::options::SOAP_ACTION_KEY;
use crate::schema::SchemaProvider;

/// Build the outgoing message for `target` from `params`.
///
/// Parameters keep their order. The action selector is never sent.
pub fn prepare_parameters<S: SchemaProvider + ?Sized>(
    schema: &S,
    target: &RequestTarget,
    params: &[(String, ParamValue)],
) -> Result<OutgoingMessage> {
    let Some(spec) = schema.parameter_types(&target.operation)? else {
        return Err(QaawsError::UnknownOperation {
            operation: target.operation.clone(),
            valid: schema.soap_actions()?,
        });
    };

    let mut message = OutgoingMessage::new();
    for (name, value) in params {
        if name == SOAP_ACTION_KEY {
            continue;
        }
        let Some(param_type) = spec.get(name) else {
            return Err(QaawsError::UnknownParameter {
                parameter: name.clone(),
                operation: target.operation.clone(),
                valid: spec.names().map(str::to_string).collect(),
            });
        };
        let coerced = coerce_parameter(name, value, param_type, target.kind)?;
        trace!(parameter = %name, param_type = %param_type, "prepared parameter");
        message.insert(name.clone(), coerced);
    }

    debug!(
        operation = %target.operation,
        params = message.len(),
        "prepared outgoing message"
    );
    Ok(message)
}

fn coerce_parameter(
    name: &str,
    value: &ParamValue,
    param_type: &ParamType,
    kind: RequestKind,
) -> Result<MessageValue> {
    match param_type {
        ParamType::DateTime => coerce_datetime(value)
            .map(split_multi_value)
            .ok_or_else(|| QaawsError::ParameterType {
                parameter: name.to_string(),
                value: value.to_string(),
            }),
        ParamType::LovValueIndex if kind == RequestKind::CustomAction => {
            Ok(wrap_lov_reference(value.to_wire_string()))
        }
        _ => Ok(match value {
            ParamValue::Text(text) => split_multi_value(text.clone()),
            other => MessageValue::Scalar(other.to_wire_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use qaaws_model::ParameterSpec;

    use super::*;

    struct Fixed(ParameterSpec);

    impl SchemaProvider for Fixed {
        fn parameter_types(&self, operation: &str) -> Result<Option<ParameterSpec>> {
            Ok((operation == "standings").then(|| self.0.clone()))
        }

        fn soap_actions(&self) -> Result<Vec<String>> {
            Ok(vec!["standings".to_string()])
        }
    }

    fn schema() -> Fixed {
        Fixed(
            [
                ("Team", ParamType::Other("string".to_string())),
                ("Start", ParamType::DateTime),
                ("Season", ParamType::LovValueIndex),
                ("Limit", ParamType::Other("int".to_string())),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn params(pairs: &[(&str, ParamValue)]) -> Vec<(String, ParamValue)> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_coerces_by_declared_type() {
        let message = prepare_parameters(
            &schema(),
            &RequestTarget::custom_action("standings"),
            &params(&[
                ("Team", "Mets;Yankees".into()),
                ("Start", "2023-5-1".into()),
                ("Season", "2023".into()),
                ("Limit", 10_i64.into()),
            ]),
        )
        .unwrap();
        let names: Vec<_> = message.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Team", "Start", "Season", "Limit"]);
        assert_eq!(
            message.get("Team"),
            Some(&MessageValue::Repeated(vec!["Mets".to_string(), "Yankees".to_string()]))
        );
        assert_eq!(message.get("Start"), Some(&MessageValue::scalar("05/01/2023 00:00:00")));
        assert!(matches!(message.get("Season"), Some(MessageValue::Nested(_))));
        assert_eq!(message.get("Limit"), Some(&MessageValue::scalar("10")));
    }

    #[test]
    fn test_lov_reference_only_wrapped_for_custom_action() {
        let mut target = RequestTarget::custom_action("standings");
        target.kind = RequestKind::DefaultQuery;
        let message =
            prepare_parameters(&schema(), &target, &params(&[("Season", "2023".into())]))
                .unwrap();
        assert_eq!(message.get("Season"), Some(&MessageValue::scalar("2023")));
    }

    #[test]
    fn test_action_selector_is_dropped() {
        let message = prepare_parameters(
            &schema(),
            &RequestTarget::custom_action("standings"),
            &params(&[("soap_action", "standings".into()), ("Team", "Mets".into())]),
        )
        .unwrap();
        assert_eq!(message.len(), 1);
        assert_eq!(message.get("Team"), Some(&MessageValue::scalar("Mets")));
    }

    #[test]
    fn test_unknown_operation() {
        let err = prepare_parameters(&schema(), &RequestTarget::custom_action("ranking"), &[])
            .unwrap_err();
        match err {
            QaawsError::UnknownOperation { operation, valid } => {
                assert_eq!(operation, "ranking");
                assert_eq!(valid, vec!["standings".to_string()]);
            }
            other => panic!("expected unknown operation, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_datetime() {
        let err = prepare_parameters(
            &schema(),
            &RequestTarget::custom_action("standings"),
            &params(&[("Start", "opening day".into())]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QaawsError::ParameterType { ref parameter, .. } if parameter == "Start"
        ));
        assert!(err.to_string().contains("opening day"));
    }
}
