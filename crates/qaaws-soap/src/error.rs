//! Error types for SOAP exchanges.

use thiserror::Error;

/// Errors raised while talking SOAP to the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SoapError {
    /// Document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error while writing a document.
    #[error("I/O error: {0}")]
    Io(String),

    /// HTTP request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// Service answered with a non-success status and no SOAP Fault.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as received.
        body: String,
    },

    /// Service answered with a SOAP Fault.
    #[error("SOAP fault ({code}): {message}")]
    Fault {
        /// `faultcode` (or SOAP 1.2 `Code/Value`).
        code: String,
        /// `faultstring` (or SOAP 1.2 `Reason/Text`).
        message: String,
    },

    /// Service definition lacks a part the adapter needs.
    #[error("invalid WSDL: {0}")]
    Wsdl(String),

    /// Response document is not a SOAP envelope with a body.
    #[error("invalid SOAP envelope: {0}")]
    Envelope(String),
}

impl SoapError {
    /// Returns whether the service itself answered (fault or HTTP status),
    /// as opposed to the request never completing.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Fault { .. })
    }
}

impl From<quick_xml::Error> for SoapError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<std::io::Error> for SoapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for SoapError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for SOAP operations.
pub type Result<T> = std::result::Result<T, SoapError>;
