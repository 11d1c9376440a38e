//! SOAP 1.1 request envelopes.

use std::io::Write;

use qaaws_model::{MessageValue, OutgoingMessage};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, SoapError};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Prefix bound to the service's target namespace.
pub const TARGET_PREFIX: &str = "tns";

/// Everything needed to write one request envelope.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeRequest<'a> {
    pub target_namespace: &'a str,
    /// Body element name, as written in the WSDL.
    pub element: &'a str,
    /// Qualify parameter elements with the target namespace.
    pub qualified: bool,
    pub message: &'a OutgoingMessage,
    /// Serialized session sent in a `QaaWSHeader`.
    pub serialized_session: Option<&'a str>,
}

/// Write a request envelope.
pub fn build_envelope(request: &EnvelopeRequest<'_>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut envelope = BytesStart::new("soap:Envelope");
    envelope.push_attribute(("xmlns:soap", SOAP_ENV_NS));
    envelope.push_attribute(("xmlns:tns", request.target_namespace));
    writer.write_event(Event::Start(envelope))?;

    if let Some(session) = request.serialized_session {
        writer.write_event(Event::Start(BytesStart::new("soap:Header")))?;
        writer.write_event(Event::Start(BytesStart::new("QaaWSHeader")))?;
        writer.write_event(Event::Start(BytesStart::new("serializedSession")))?;
        if session.contains("]]>") {
            writer.write_event(Event::Text(BytesText::new(session)))?;
        } else {
            writer.write_event(Event::CData(BytesCData::new(session)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("serializedSession")))?;
        writer.write_event(Event::End(BytesEnd::new("QaaWSHeader")))?;
        writer.write_event(Event::End(BytesEnd::new("soap:Header")))?;
    }

    writer.write_event(Event::Start(BytesStart::new("soap:Body")))?;
    let body_element = format!("{TARGET_PREFIX}:{}", request.element);
    writer.write_event(Event::Start(BytesStart::new(body_element.as_str())))?;
    let prefix = request.qualified.then_some(TARGET_PREFIX);
    write_message(&mut writer, request.message, prefix)?;
    writer.write_event(Event::End(BytesEnd::new(body_element.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Envelope")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|err| SoapError::Xml(format!("envelope is not UTF-8: {err}")))
}

fn write_message<W: Write>(
    writer: &mut Writer<W>,
    message: &OutgoingMessage,
    prefix: Option<&str>,
) -> Result<()> {
    for (name, value) in message.iter() {
        let tag = match prefix {
            Some(prefix) => format!("{prefix}:{name}"),
            None => name.to_string(),
        };
        match value {
            MessageValue::Scalar(text) => write_text_element(writer, &tag, text)?,
            MessageValue::Repeated(values) => {
                for text in values {
                    write_text_element(writer, &tag, text)?;
                }
            }
            MessageValue::Nested(inner) => {
                writer.write_event(Event::Start(BytesStart::new(tag.as_str())))?;
                write_message(writer, inner, prefix)?;
                writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
            }
        }
    }
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> OutgoingMessage {
        let mut message = OutgoingMessage::new();
        message.insert("Team", MessageValue::Repeated(vec!["Mets".into(), "Yankees".into()]));
        let mut prompt = OutgoingMessage::new();
        prompt.insert("valueofPrompt", MessageValue::scalar("2023"));
        message.insert("Season", MessageValue::Nested(prompt));
        message.insert("Note", MessageValue::scalar("a < b"));
        message
    }

    #[test]
    fn test_unqualified_body() {
        let message = message();
        let xml = build_envelope(&EnvelopeRequest {
            target_namespace: "Standings",
            element: "TopScorers",
            qualified: false,
            message: &message,
            serialized_session: None,
        })
        .unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns:tns="Standings""#));
        assert!(!xml.contains("soap:Header"));
        assert!(xml.contains(
            "<tns:TopScorers><Team>Mets</Team><Team>Yankees</Team>\
             <Season><valueofPrompt>2023</valueofPrompt></Season>\
             <Note>a &lt; b</Note></tns:TopScorers>"
        ));
    }

    #[test]
    fn test_qualified_body_with_session_header() {
        let mut message = OutgoingMessage::new();
        message.insert("Team", MessageValue::scalar("Mets"));
        let xml = build_envelope(&EnvelopeRequest {
            target_namespace: "Standings",
            element: "runQueryAsAService",
            qualified: true,
            message: &message,
            serialized_session: Some("SESSION-TOKEN"),
        })
        .unwrap();
        assert!(xml.contains(
            "<soap:Header><QaaWSHeader><serializedSession><![CDATA[SESSION-TOKEN]]>\
             </serializedSession></QaaWSHeader></soap:Header>"
        ));
        assert!(xml.contains(
            "<tns:runQueryAsAService><tns:Team>Mets</tns:Team></tns:runQueryAsAService>"
        ));
    }
}
