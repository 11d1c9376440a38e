//! QaaWS report adapter.
//!
//! Turns a loose set of request options into a call against a published
//! query service and flattens the answer into a [`Table`] of records.
//!
//! A request goes through four steps:
//!
//! 1. [`classify`] picks the operation and response element
//! 2. [`prepare_parameters`] validates parameters against the service
//!    definition and coerces them for the wire
//! 3. the [`SoapClient`] sends the call
//! 4. [`normalize`] reads the response tree into records
//!
//! [`Qaaws`] sequences these over an HTTP transport.

pub mod adapter;
pub mod classify;
pub mod client;
pub mod coerce;
pub mod config;
mod error;
pub mod normalize;
pub mod options;
pub mod prepare;
pub mod schema;

pub use adapter::Qaaws;
pub use classify::classify;
pub use client::SoapClient;
pub use coerce::{coerce_datetime, parse_datetime, split_multi_value, wrap_lov_reference};
pub use config::{Credentials, DEFAULT_TIMEOUT_SECS, QaawsConfig};
pub use error::{QaawsError, Result};
pub use normalize::normalize;
pub use options::{LOV_KEY, RequestOptions, SOAP_ACTION_KEY};
pub use prepare::prepare_parameters;
pub use schema::SchemaProvider;

pub use qaaws_model::{Record, RequestKind, RequestTarget, Table};
