//! Type coercion for outgoing parameter values.
//!
//! The service expects dates as `MM/DD/YYYY HH:MM:SS`, list-of-values
//! prompts wrapped in a `valueofPrompt` element, and multiple values for
//! one parameter as repeated elements.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use qaaws_model::{MessageValue, OutgoingMessage, ParamValue};

/// Date/time layout the service accepts.
pub const WIRE_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Field that wraps a list-of-values prompt reference.
pub const LOV_PROMPT_FIELD: &str = "valueofPrompt";

/// Separator for several values passed in one string.
pub const MULTI_VALUE_DELIMITER: char = ';';

/// Parse a caller-supplied date or date/time.
///
/// Slash-separated dates read day first, then month first when that fails
/// (`05/01/2023` is 5 January, `12/31/2023` is 31 December). A date without
/// a time is taken at midnight.
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(datetime) = try_parse_with_offset(value) {
        return Some(datetime);
    }
    try_parse_datetime(value)
        .or_else(|| try_parse_date(value).map(|date| date.and_time(NaiveTime::MIN)))
}

/// Offset-bearing forms keep the wall-clock time in their own offset.
fn try_parse_with_offset(value: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_local());
    }
    let formats = [
        "%Y-%m-%d %H:%M:%S %z",
        "%Y-%m-%d %H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y%m%dT%H%M%S%z",
    ];
    formats
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        .map(|datetime| datetime.naive_local())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d-%b-%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%Y%m%dT%H%M%S",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y",  // 15-Jan-2024
        "%d %b %Y",  // 15 Jan 2024
        "%d %B %Y",  // 15 January 2024
        "%b %d, %Y", // Jan 15, 2024
        "%B %d, %Y", // January 15, 2024
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%Y%m%d", // 20240115
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Render a value in [`WIRE_DATETIME_FORMAT`].
///
/// Text is parsed; dates and date/times are used as they are. Returns
/// `None` when the value has no date/time reading.
#[must_use]
pub fn coerce_datetime(value: &ParamValue) -> Option<String> {
    let datetime = match value {
        ParamValue::Text(text) => parse_datetime(text)?,
        other => other.as_datetime()?,
    };
    Some(datetime.format(WIRE_DATETIME_FORMAT).to_string())
}

/// Split `a;b` into repeated values. A value without the delimiter stays
/// scalar. Trailing empty pieces are dropped.
#[must_use]
pub fn split_multi_value(value: String) -> MessageValue {
    if !value.contains(MULTI_VALUE_DELIMITER) {
        return MessageValue::Scalar(value);
    }
    let mut parts: Vec<String> = value
        .split(MULTI_VALUE_DELIMITER)
        .map(str::to_string)
        .collect();
    while parts.last().is_some_and(String::is_empty) {
        parts.pop();
    }
    MessageValue::Repeated(parts)
}

/// Wrap a prompt value as `<valueofPrompt>value</valueofPrompt>`.
#[must_use]
pub fn wrap_lov_reference(value: String) -> MessageValue {
    let mut inner = OutgoingMessage::new();
    inner.insert(LOV_PROMPT_FIELD, MessageValue::Scalar(value));
    MessageValue::Nested(inner)
}
