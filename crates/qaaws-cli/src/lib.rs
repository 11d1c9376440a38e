//! CLI library components for the QaaWS client.

pub mod logging;
pub mod output;
pub mod settings;
