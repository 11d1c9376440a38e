//! Operation parameters: declared types, caller values and the outgoing message.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Declared type of an operation parameter, as named by the service schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `xsd:dateTime`.
    DateTime,
    /// Reference to a prompt's list-of-values entry.
    LovValueIndex,
    /// Any other type, carried by its schema name.
    Other(String),
}

impl ParamType {
    /// Map a schema `type` attribute (with or without namespace prefix).
    #[must_use]
    pub fn from_schema_type(raw: &str) -> Self {
        let local = raw.rsplit(':').next().unwrap_or(raw);
        match local {
            "dateTime" => Self::DateTime,
            "LovValueIndex" => Self::LovValueIndex,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::DateTime => "dateTime",
            Self::LovValueIndex => "LovValueIndex",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared input parameters of one operation, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSpec {
    params: Vec<(String, ParamType)>,
}

impl ParameterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, param_type: ParamType) {
        self.params.push((name.into(), param_type));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamType> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, param_type)| param_type)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamType)> {
        self.params.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ParamType)> for ParameterSpec {
    fn from_iter<I: IntoIterator<Item = (K, ParamType)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Loosely typed value supplied by a caller for a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl ParamValue {
    /// The value as a date/time, if it already carries date/time semantics.
    /// Dates are taken at midnight. Text is not parsed here.
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(date) => Some(date.and_time(NaiveTime::MIN)),
            Self::DateTime(datetime) => Some(*datetime),
            _ => None,
        }
    }

    /// Text form sent on the wire when no coercion applies.
    #[must_use]
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::DateTime(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// A coerced value ready to be written as XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValue {
    /// One element with text content.
    Scalar(String),
    /// The same element repeated once per value.
    Repeated(Vec<String>),
    /// One element wrapping child elements.
    Nested(OutgoingMessage),
}

impl MessageValue {
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }
}

/// Ordered parameter payload handed to the SOAP client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    entries: Vec<(String, MessageValue)>,
}

impl OutgoingMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter. Re-setting an existing name replaces its value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: MessageValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MessageValue> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_strips_namespace() {
        assert_eq!(ParamType::from_schema_type("s:dateTime"), ParamType::DateTime);
        assert_eq!(
            ParamType::from_schema_type("s0:LovValueIndex"),
            ParamType::LovValueIndex
        );
        assert_eq!(
            ParamType::from_schema_type("xsd:string"),
            ParamType::Other("string".to_string())
        );
        assert_eq!(ParamType::from_schema_type("int").name(), "int");
    }

    #[test]
    fn test_spec_lookup_keeps_order() {
        let spec: ParameterSpec = [
            ("bar", ParamType::Other("string".to_string())),
            ("baz", ParamType::DateTime),
        ]
        .into_iter()
        .collect();
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["bar", "baz"]);
        assert_eq!(spec.get("baz"), Some(&ParamType::DateTime));
        assert!(spec.get("foo").is_none());
    }

    #[test]
    fn test_date_values_expose_datetime() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let value = ParamValue::from(date);
        assert_eq!(
            value.as_datetime().unwrap().to_string(),
            "2023-05-01 00:00:00"
        );
        assert!(ParamValue::from("2023-05-01").as_datetime().is_none());
        assert!(ParamValue::from(7_i64).as_datetime().is_none());
    }

    #[test]
    fn test_message_insert_replaces_in_place() {
        let mut message = OutgoingMessage::new();
        message.insert("a", MessageValue::scalar("1"));
        message.insert("b", MessageValue::scalar("2"));
        message.insert("a", MessageValue::Repeated(vec!["x".into(), "y".into()]));
        let names: Vec<_> = message.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(
            message.get("a"),
            Some(&MessageValue::Repeated(vec!["x".into(), "y".into()]))
        );
    }
}
