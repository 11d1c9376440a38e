//! One SOAP request/response exchange.

use qaaws_model::{Node, OutgoingMessage};
use tracing::{debug, trace};

use crate::envelope::{EnvelopeRequest, build_envelope};
use crate::error::{Result, SoapError};
use crate::transport::Transport;
use crate::tree::parse_response;
use crate::wsdl::{Operation, Wsdl};

/// Invoke `operation` at `endpoint` and return the parsed response tree.
///
/// A SOAP Fault in the body is reported as [`SoapError::Fault`] whatever the
/// HTTP status; any other non-success status is [`SoapError::Http`].
pub fn invoke<T: Transport + ?Sized>(
    transport: &T,
    endpoint: &str,
    wsdl: &Wsdl,
    operation: &Operation,
    message: &OutgoingMessage,
    serialized_session: Option<&str>,
) -> Result<Node> {
    let envelope = build_envelope(&EnvelopeRequest {
        target_namespace: &wsdl.target_namespace,
        element: &operation.input_element,
        qualified: wsdl.element_form_qualified,
        message,
        serialized_session,
    })?;

    let response = transport.post_xml(endpoint, &operation.soap_action, envelope)?;
    debug!(
        operation = %operation.name,
        status = response.status,
        bytes = response.body.len(),
        "SOAP response received"
    );
    trace!("SOAP response: {}", response.body);

    let tree = match parse_response(&response.body) {
        Ok(tree) => tree,
        Err(_) if !response.is_success() => {
            return Err(SoapError::Http {
                status: response.status,
                body: response.body,
            });
        }
        Err(err) => return Err(err),
    };

    if let Some(fault) = fault_of(&tree) {
        return Err(fault);
    }
    if !response.is_success() {
        return Err(SoapError::Http {
            status: response.status,
            body: response.body,
        });
    }
    if tree.path(&["envelope", "body"]).is_none() {
        return Err(SoapError::Envelope("response has no SOAP Body".to_string()));
    }
    Ok(tree)
}

/// Extract a SOAP 1.1 or 1.2 Fault from a response tree.
fn fault_of(tree: &Node) -> Option<SoapError> {
    let fault = tree.path(&["envelope", "body", "fault"])?;
    let code = fault_text(fault, &["faultcode"])
        .or_else(|| fault_text(fault, &["code", "value"]))
        .unwrap_or_default();
    let message = fault_text(fault, &["faultstring"])
        .or_else(|| fault_text(fault, &["reason", "text"]))
        .unwrap_or_default();
    Some(SoapError::Fault { code, message })
}

fn fault_text(fault: &Node, path: &[&str]) -> Option<String> {
    fault.path(path).and_then(Node::as_text).map(str::to_string)
}
