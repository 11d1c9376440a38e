//! WSDL inspection: the operation catalog of a document/literal service.

use std::collections::HashMap;

use qaaws_model::{ParamType, ParameterSpec};
use tracing::{debug, trace};

use crate::error::{Result, SoapError};
use crate::xml::{XmlElement, parse_document, snake_case};

/// One operation exposed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Name as written in the WSDL (e.g. `runQueryAsAService`).
    pub name: String,
    /// snake_case lookup key (e.g. `run_query_as_a_service`).
    pub key: String,
    /// Value for the `SOAPAction` HTTP header.
    pub soap_action: String,
    /// Body element of the request message.
    pub input_element: String,
    /// Declared input parameters, in schema order.
    pub parameters: ParameterSpec,
}

/// Parsed service definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wsdl {
    pub service_name: Option<String>,
    pub target_namespace: String,
    /// Whether child elements of a request must carry the target namespace.
    pub element_form_qualified: bool,
    operations: Vec<Operation>,
}

impl Wsdl {
    /// Parse a WSDL document.
    pub fn parse(source: &str) -> Result<Self> {
        let root = parse_document(source)?;
        if root.name != "definitions" {
            return Err(SoapError::Wsdl(format!(
                "expected <definitions> root, found <{}>",
                root.name
            )));
        }

        let target_namespace = root
            .attr("targetNamespace")
            .ok_or_else(|| SoapError::Wsdl("missing targetNamespace".to_string()))?
            .to_string();
        let service_name = root
            .child("service")
            .and_then(|service| service.attr("name"))
            .map(str::to_string);

        let schemas: Vec<&XmlElement> = root
            .children_named("types")
            .flat_map(|types| types.children_named("schema"))
            .collect();
        let element_form_qualified = schemas
            .first()
            .and_then(|schema| schema.attr("elementFormDefault"))
            .is_some_and(|form| form == "qualified");

        let mut elements: HashMap<&str, &XmlElement> = HashMap::new();
        let mut complex_types: HashMap<&str, &XmlElement> = HashMap::new();
        for schema in &schemas {
            for item in &schema.children {
                let Some(name) = item.attr("name") else {
                    continue;
                };
                match item.name.as_str() {
                    "element" => {
                        elements.insert(name, item);
                    }
                    "complexType" => {
                        complex_types.insert(name, item);
                    }
                    _ => {}
                }
            }
        }

        let messages = parse_messages(&root);
        let inputs = parse_port_type_inputs(&root);
        let actions = parse_binding_actions(&root);

        // Binding operations are authoritative; fall back to the port type
        // for definitions without a SOAP binding.
        let mut names: Vec<&str> = actions.iter().map(|(name, _)| *name).collect();
        if names.is_empty() {
            names = inputs.iter().map(|(name, _)| *name).collect();
        }

        let mut operations = Vec::with_capacity(names.len());
        for name in names {
            let input_element = inputs
                .iter()
                .find(|(op, _)| *op == name)
                .and_then(|(_, message)| messages.get(message))
                .copied()
                .unwrap_or(name);
            let parameters = elements
                .get(input_element)
                .map(|element| element_fields(element, &complex_types))
                .unwrap_or_default();
            let soap_action = actions
                .iter()
                .find(|(op, _)| *op == name)
                .map(|(_, action)| (*action).to_string())
                .unwrap_or_default();
            trace!(operation = name, params = parameters.len(), "parsed WSDL operation");
            operations.push(Operation {
                name: name.to_string(),
                key: snake_case(name),
                soap_action,
                input_element: input_element.to_string(),
                parameters,
            });
        }

        debug!(
            service = service_name.as_deref().unwrap_or("?"),
            operations = operations.len(),
            "parsed WSDL"
        );

        Ok(Self {
            service_name,
            target_namespace,
            element_form_qualified,
            operations,
        })
    }

    /// Find an operation by its snake_case key.
    ///
    /// WSDL names are not accepted: responses are read under snake_case keys,
    /// so only the key names a reply the caller can normalize.
    #[must_use]
    pub fn operation(&self, key: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.key == key)
    }

    /// snake_case keys of all operations, in definition order.
    #[must_use]
    pub fn operation_keys(&self) -> Vec<String> {
        self.operations.iter().map(|op| op.key.clone()).collect()
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

fn local(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Message name to the local name of its part element.
fn parse_messages(root: &XmlElement) -> HashMap<&str, &str> {
    let mut messages = HashMap::new();
    for message in root.children_named("message") {
        let Some(name) = message.attr("name") else {
            continue;
        };
        let part = message
            .child("part")
            .and_then(|part| part.attr("element").or_else(|| part.attr("type")));
        if let Some(element) = part {
            messages.insert(name, local(element));
        }
    }
    messages
}

/// Operation name to the local name of its input message.
fn parse_port_type_inputs(root: &XmlElement) -> Vec<(&str, &str)> {
    root.children_named("portType")
        .flat_map(|port| port.children_named("operation"))
        .filter_map(|op| {
            let name = op.attr("name")?;
            let message = op.child("input").and_then(|input| input.attr("message"))?;
            Some((name, local(message)))
        })
        .collect()
}

/// Operation name to its `soapAction`, from the first binding.
fn parse_binding_actions(root: &XmlElement) -> Vec<(&str, &str)> {
    let Some(binding) = root.child("binding") else {
        return Vec::new();
    };
    binding
        .children_named("operation")
        .filter_map(|op| {
            let name = op.attr("name")?;
            let action = op
                .child("operation")
                .and_then(|soap_op| soap_op.attr("soapAction"))
                .unwrap_or("");
            Some((name, action))
        })
        .collect()
}

fn element_fields(
    element: &XmlElement,
    complex_types: &HashMap<&str, &XmlElement>,
) -> ParameterSpec {
    let complex = element.child("complexType").or_else(|| {
        element
            .attr("type")
            .and_then(|ty| complex_types.get(local(ty)).copied())
    });
    let mut spec = ParameterSpec::new();
    if let Some(complex) = complex {
        collect_fields(complex, &mut spec);
    }
    spec
}

fn collect_fields(node: &XmlElement, spec: &mut ParameterSpec) {
    for child in &node.children {
        match child.name.as_str() {
            "element" => {
                if let Some(name) = child.attr("name") {
                    let ty = child.attr("type").unwrap_or("anyType");
                    spec.push(name, ParamType::from_schema_type(ty));
                }
            }
            "sequence" | "all" | "choice" => collect_fields(child, spec),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSDL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:s="http://www.w3.org/2001/XMLSchema"
             xmlns:s0="Standings"
             targetNamespace="Standings">
  <types>
    <s:schema elementFormDefault="qualified" targetNamespace="Standings">
      <s:complexType name="LovValueIndex">
        <s:sequence><s:element name="valueofPrompt" type="s:string"/></s:sequence>
      </s:complexType>
      <s:element name="runQueryAsAService">
        <s:complexType>
          <s:sequence>
            <s:element name="login" type="s:string"/>
            <s:element name="password" type="s:string"/>
            <s:element name="Team" type="s:string" maxOccurs="unbounded"/>
            <s:element name="Start" type="s:dateTime"/>
          </s:sequence>
        </s:complexType>
      </s:element>
      <s:element name="TopScorers" type="s0:TopScorersRequest"/>
      <s:complexType name="TopScorersRequest">
        <s:sequence>
          <s:element name="Season" type="s0:LovValueIndex"/>
        </s:sequence>
      </s:complexType>
    </s:schema>
  </types>
  <message name="runQueryAsAServiceSoapIn"><part name="parameters" element="s0:runQueryAsAService"/></message>
  <message name="TopScorersSoapIn"><part name="parameters" element="s0:TopScorers"/></message>
  <portType name="StandingsSoap">
    <operation name="runQueryAsAService"><input message="s0:runQueryAsAServiceSoapIn"/></operation>
    <operation name="TopScorers"><input message="s0:TopScorersSoapIn"/></operation>
  </portType>
  <binding name="StandingsSoap" type="s0:StandingsSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http" style="document"/>
    <operation name="runQueryAsAService">
      <soap:operation soapAction="Standings/runQueryAsAService" style="document"/>
    </operation>
    <operation name="TopScorers">
      <soap:operation soapAction="Standings/TopScorers" style="document"/>
    </operation>
  </binding>
  <service name="Standings"/>
</definitions>"#;

    #[test]
    fn test_parse_catalog() {
        let wsdl = Wsdl::parse(WSDL).unwrap();
        assert_eq!(wsdl.target_namespace, "Standings");
        assert_eq!(wsdl.service_name.as_deref(), Some("Standings"));
        assert!(wsdl.element_form_qualified);
        assert_eq!(
            wsdl.operation_keys(),
            vec!["run_query_as_a_service".to_string(), "top_scorers".to_string()]
        );
    }

    #[test]
    fn test_operation_parameters() {
        let wsdl = Wsdl::parse(WSDL).unwrap();
        let op = wsdl.operation("run_query_as_a_service").unwrap();
        assert_eq!(op.name, "runQueryAsAService");
        assert_eq!(op.soap_action, "Standings/runQueryAsAService");
        assert_eq!(op.input_element, "runQueryAsAService");
        assert_eq!(
            op.parameters.names().collect::<Vec<_>>(),
            vec!["login", "password", "Team", "Start"]
        );
        assert_eq!(op.parameters.get("Start"), Some(&ParamType::DateTime));
    }

    #[test]
    fn test_named_request_type_and_key_lookup() {
        let wsdl = Wsdl::parse(WSDL).unwrap();
        let op = wsdl.operation("top_scorers").unwrap();
        assert_eq!(op.name, "TopScorers");
        assert_eq!(op.parameters.get("Season"), Some(&ParamType::LovValueIndex));
        assert!(wsdl.operation("TopScorers").is_none());
        assert!(wsdl.operation("missing").is_none());
    }

    #[test]
    fn test_rejects_non_wsdl() {
        assert!(matches!(
            Wsdl::parse("<html><body>Not found</body></html>"),
            Err(SoapError::Wsdl(_))
        ));
        assert!(matches!(Wsdl::parse("not xml at all <"), Err(_)));
    }
}
