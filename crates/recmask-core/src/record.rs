use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Ordered field name → dynamic value mapping.
pub type Record = Map<String, Value>;

/// Key used when a payload cannot be parsed into an object.
pub const RAW_KEY: &str = "__raw__";

/// How a payload was turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    Parsed,
    /// Parsed after swapping single quotes for double quotes.
    Repaired,
    /// Kept verbatim under [`RAW_KEY`].
    Raw,
}

/// Parse a JSON object payload, never failing.
pub fn parse_payload(raw: &str) -> (Record, PayloadSource) {
    if let Ok(Value::Object(record)) = serde_json::from_str::<Value>(raw) {
        return (record, PayloadSource::Parsed);
    }
    if let Ok(Value::Object(record)) = serde_json::from_str::<Value>(&raw.replace('\'', "\"")) {
        return (record, PayloadSource::Repaired);
    }
    let mut record = Record::new();
    record.insert(RAW_KEY.to_string(), Value::String(raw.to_string()));
    (record, PayloadSource::Raw)
}

/// String form used for classification: strings as-is, everything else as
/// compact JSON text.
pub fn coerce(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
