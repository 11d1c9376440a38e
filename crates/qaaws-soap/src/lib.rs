//! SOAP plumbing for the QaaWS report adapter.
//!
//! This crate owns everything that touches XML or HTTP:
//!
//! - [`xml`]: a small element tree built with `quick-xml`
//! - [`tree`]: conversion of a response document into a [`qaaws_model::Node`]
//! - [`wsdl`]: the operation catalog of a service definition
//! - [`envelope`]: SOAP 1.1 request envelopes
//! - [`transport`]: the HTTP seam, with a blocking `reqwest` implementation
//! - [`client`]: one request/response exchange, including SOAP Fault detection
//!
//! # Example
//!
//! ```
//! use qaaws_soap::parse_response;
//!
//! let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
//!   <soap:Body><pingResponse><message>pong</message></pingResponse></soap:Body>
//! </soap:Envelope>"#;
//! let tree = parse_response(xml).unwrap();
//! let message = tree.path(&["envelope", "body", "ping_response", "message"]);
//! assert_eq!(message.and_then(|node| node.as_text()), Some("pong"));
//! ```

pub mod client;
pub mod envelope;
mod error;
pub mod transport;
pub mod tree;
pub mod wsdl;
pub mod xml;

pub use client::invoke;
pub use envelope::{EnvelopeRequest, build_envelope};
pub use error::{Result, SoapError};
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use tree::{parse_response, to_node};
pub use wsdl::{Operation, Wsdl};
pub use xml::{XmlElement, parse_document, snake_case};
