//! Caller-supplied request options.

use qaaws_model::ParamValue;

/// Option key selecting a list-of-values request.
pub const LOV_KEY: &str = "lov";

/// Option key naming a custom SOAP action.
pub const SOAP_ACTION_KEY: &str = "soap_action";

/// What to ask the service for.
///
/// Every entry in `params` is sent as an operation parameter, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// List name; selects a list-of-values request.
    pub lov: Option<String>,
    /// Action name; selects a custom-action request.
    pub soap_action: Option<String>,
    pub params: Vec<(String, ParamValue)>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lov(mut self, list_name: impl Into<String>) -> Self {
        self.lov = Some(list_name.into());
        self
    }

    #[must_use]
    pub fn soap_action(mut self, action: impl Into<String>) -> Self {
        self.soap_action = Some(action.into());
        self
    }

    /// Add a parameter, replacing an earlier value of the same name.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Build options from loose `key=value` pairs.
    ///
    /// The `lov` and `soap_action` keys select the request kind; every
    /// other pair becomes a text parameter.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().fold(Self::new(), |options, (key, value)| {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                LOV_KEY => options.lov(value),
                SOAP_ACTION_KEY => options.soap_action(value),
                _ => options.param(key, value),
            }
        })
    }
}
