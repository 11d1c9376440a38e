//! Data model definitions for the QaaWS report adapter.
//!
//! The types here carry no I/O: they describe what the SOAP layer hands the
//! adapter (`Node`), what callers hand it (`ParamValue`), what goes out on the
//! wire (`OutgoingMessage`) and what comes back to callers (`Table`).

pub mod node;
pub mod params;
pub mod request;
pub mod table;

pub use node::Node;
pub use params::{MessageValue, OutgoingMessage, ParamType, ParamValue, ParameterSpec};
pub use request::{DEFAULT_OPERATION, DEFAULT_RESPONSE_ELEMENT, RequestKind, RequestTarget};
pub use table::{Record, Table};
