//! In-memory service used by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use qaaws_core::{Qaaws, QaawsConfig};
use qaaws_soap::{HttpResponse, Result, Transport};

pub const ENDPOINT: &str = "http://bo.example.com/dswsbobje/qaawsservices/queryasaservice";
pub const CUID: &str = "AbC123";

pub const WSDL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:s="http://www.w3.org/2001/XMLSchema"
             xmlns:s0="Standings"
             targetNamespace="Standings">
  <types>
    <s:schema targetNamespace="Standings">
      <s:complexType name="LovValueIndex">
        <s:sequence><s:element name="valueofPrompt" type="s:string"/></s:sequence>
      </s:complexType>
      <s:element name="runQueryAsAService">
        <s:complexType><s:sequence>
          <s:element name="login" type="s:string"/>
          <s:element name="password" type="s:string"/>
          <s:element name="Team" type="s:string"/>
          <s:element name="Start" type="s:dateTime"/>
        </s:sequence></s:complexType>
      </s:element>
      <s:element name="TopScorers">
        <s:complexType><s:sequence>
          <s:element name="Season" type="s0:LovValueIndex"/>
          <s:element name="Team" type="s:string"/>
        </s:sequence></s:complexType>
      </s:element>
      <s:element name="ValuesOfTeams">
        <s:complexType><s:sequence>
          <s:element name="login" type="s:string"/>
          <s:element name="password" type="s:string"/>
        </s:sequence></s:complexType>
      </s:element>
    </s:schema>
  </types>
  <message name="runQueryAsAServiceSoapIn"><part name="parameters" element="s0:runQueryAsAService"/></message>
  <message name="TopScorersSoapIn"><part name="parameters" element="s0:TopScorers"/></message>
  <message name="ValuesOfTeamsSoapIn"><part name="parameters" element="s0:ValuesOfTeams"/></message>
  <portType name="StandingsSoap">
    <operation name="runQueryAsAService"><input message="s0:runQueryAsAServiceSoapIn"/></operation>
    <operation name="TopScorers"><input message="s0:TopScorersSoapIn"/></operation>
    <operation name="ValuesOfTeams"><input message="s0:ValuesOfTeamsSoapIn"/></operation>
  </portType>
  <binding name="StandingsSoap" type="s0:StandingsSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http" style="document"/>
    <operation name="runQueryAsAService"><soap:operation soapAction="Standings/runQueryAsAService"/></operation>
    <operation name="TopScorers"><soap:operation soapAction="Standings/TopScorers"/></operation>
    <operation name="ValuesOfTeams"><soap:operation soapAction="Standings/ValuesOfTeams"/></operation>
  </binding>
  <service name="Standings"/>
</definitions>"#;

/// Wrap a body fragment in a SOAP envelope.
pub fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>{body}</soap:Body>
</soap:Envelope>"#
    )
}

/// A request the fake received.
#[derive(Debug, Clone)]
pub struct Posted {
    pub url: String,
    pub soap_action: String,
    pub body: String,
}

/// Serves the WSDL on GET and canned responses on POST, in order.
pub struct FakeService {
    pub wsdl: HttpResponse,
    responses: RefCell<VecDeque<HttpResponse>>,
    pub posted: RefCell<Vec<Posted>>,
    pub wsdl_fetches: Cell<usize>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::with_wsdl(200, WSDL)
    }

    pub fn with_wsdl(status: u16, body: &str) -> Self {
        Self {
            wsdl: HttpResponse {
                status,
                body: body.to_string(),
            },
            responses: RefCell::new(VecDeque::new()),
            posted: RefCell::new(Vec::new()),
            wsdl_fetches: Cell::new(0),
        }
    }

    /// Queue a response body.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.responses.borrow_mut().push_back(HttpResponse {
            status,
            body: body.into(),
        });
        self
    }

    pub fn last_post(&self) -> Posted {
        self.posted.borrow().last().cloned().expect("no request was posted")
    }
}

impl Transport for FakeService {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        assert_eq!(url, format!("{ENDPOINT}?wsdl=1&cuid={CUID}"));
        self.wsdl_fetches.set(self.wsdl_fetches.get() + 1);
        Ok(self.wsdl.clone())
    }

    fn post_xml(&self, url: &str, soap_action: &str, body: String) -> Result<HttpResponse> {
        self.posted.borrow_mut().push(Posted {
            url: url.to_string(),
            soap_action: soap_action.to_string(),
            body,
        });
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("no canned response left"))
    }
}

pub fn login_config() -> QaawsConfig {
    QaawsConfig::new(ENDPOINT, CUID).with_credentials("admin", "secret")
}

pub fn adapter(service: FakeService) -> Qaaws<FakeService> {
    Qaaws::with_transport(login_config(), service).expect("valid configuration")
}
