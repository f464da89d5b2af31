//! Decoding model responses into variants
//!
//! Responses are expected to be JSON but may be cut off mid-stream. The
//! decoder keeps every complete element it can recover and falls back to the
//! raw text when nothing structured survives.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

/// Opaque identifier of a decoded variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VariantId(Uuid);

impl VariantId {
    /// A fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VariantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content of one variant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VariantContent {
    /// Free text, or a non-object element printed as JSON
    Text(String),
    /// A JSON object, typically one field per content model field
    Record(Map<String, Value>),
}

impl VariantContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VariantContent::Text(s) => Some(s),
            VariantContent::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Map<String, Value>> {
        match self {
            VariantContent::Record(map) => Some(map),
            VariantContent::Text(_) => None,
        }
    }

    fn from_element(value: Value) -> Self {
        match value {
            Value::Object(map) => VariantContent::Record(map),
            Value::String(s) => VariantContent::Text(s),
            other => VariantContent::Text(other.to_string()),
        }
    }
}

/// One discrete unit of model output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub id: VariantId,
    pub content: VariantContent,
}

/// What a response turned into before it is split into variants
#[derive(Debug, PartialEq)]
enum Decoded {
    Json(Value),
    Raw(String),
}

fn parse_response(text: &str) -> Decoded {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Decoded::Json(value),
        Err(err) => {
            debug!(error = %err, "response is not valid JSON, attempting repair");
            repair(text)
        }
    }
}

/// Recover a truncated JSON array or object
///
/// Everything after the last `}` is dropped and the outer bracket closed.
/// A `}` inside a string value will cut the text short; callers rely on this
/// exact behavior, so it is kept.
fn repair(text: &str) -> Decoded {
    let closer = match text.trim_start().chars().next() {
        Some('[') => ']',
        Some('{') => '}',
        _ => {
            debug!("response does not start with '[' or '{{', keeping raw text");
            return Decoded::Raw(text.to_string());
        }
    };

    let Some(last) = text.rfind('}') else {
        debug!("no complete element in truncated response");
        return Decoded::Json(if closer == ']' {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        });
    };

    let candidate = format!("{}{}", &text[..=last], closer);
    match serde_json::from_str::<Value>(&candidate) {
        Ok(value) => {
            debug!(kept_bytes = last + 1, total_bytes = text.len(), "repaired truncated response");
            Decoded::Json(value)
        }
        Err(err) => {
            debug!(error = %err, "repair failed, keeping raw text");
            Decoded::Raw(text.to_string())
        }
    }
}

/// Decode a model response into variants, drawing ids from `id_gen`
///
/// ```rust
/// use prompt_variants::{decode, VariantId};
///
/// let variants = decode(VariantId::new, r#"[{"Title":"A"},{"Title":"B"},{"Tit"#);
/// assert_eq!(variants.len(), 2);
/// ```
pub fn decode(mut id_gen: impl FnMut() -> VariantId, text: &str) -> Vec<Variant> {
    let contents = match parse_response(text) {
        Decoded::Json(Value::Array(items)) => {
            items.into_iter().map(VariantContent::from_element).collect()
        }
        Decoded::Json(Value::Object(map)) => vec![VariantContent::Record(map)],
        Decoded::Json(other) => vec![VariantContent::from_element(other)],
        Decoded::Raw(raw) => vec![VariantContent::Text(raw)],
    };

    contents
        .into_iter()
        .map(|content| Variant {
            id: id_gen(),
            content,
        })
        .collect()
}

/// Decode a model response using random variant ids
pub fn decode_response(text: &str) -> Vec<Variant> {
    decode(VariantId::new, text)
}
