//! The SOAP exchange seam.

use qaaws_model::{Node, OutgoingMessage};

use crate::config::Credentials;
use crate::error::Result;

/// Sends one operation call and returns the parsed response tree.
pub trait SoapClient {
    fn invoke(
        &self,
        operation: &str,
        message: &OutgoingMessage,
        credentials: &Credentials,
    ) -> Result<Node>;
}
