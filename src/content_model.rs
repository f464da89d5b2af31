//! Structured-output instructions from a content model
//!
//! When a prompt is bound to a content model, the model's text fields are
//! listed after the rendered prompt so the response comes back as a JSON
//! array with one object per variation.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Synthetic key every variation object carries for its display name
pub const VARIATION_NAME_FIELD: &str = "variationName";

const VARIATION_NAME_DESCRIPTION: &str =
    "A short, descriptive name for this variation, shown when choosing between results";

/// Errors that can occur when loading a content model
#[derive(Error, Debug)]
pub enum ContentModelError {
    #[error("Failed to read content model file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse content model JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Kind of data a content model field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    LongText,
    Number,
    Boolean,
    Date,
    Enumeration,
    ContentReference,
    Image,
    Json,
    #[serde(other)]
    Other,
}

impl FieldType {
    /// Field kinds a language model can fill with text
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::LongText
                | FieldType::Number
                | FieldType::Boolean
                | FieldType::Date
                | FieldType::Enumeration
        )
    }
}

/// One field of a content model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentField {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_type: FieldType,
}

/// A typed schema describing the shape of the expected output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentModel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<ContentField>,
}

/// Prior field values of the content being varied, keyed by field name
pub type FragmentContent = HashMap<String, Value>;

impl ContentModel {
    /// Load a content model from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ContentModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a content model from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ContentModelError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Fields that can appear in the generated output
    pub fn text_fields(&self) -> impl Iterator<Item = &ContentField> {
        self.fields.iter().filter(|f| f.data_type.is_text_like())
    }
}

/// Describe a field for the model
///
/// Fallback order:
/// 1. The field's description
/// 2. The field's label
/// 3. The field's value in the existing content
/// 4. The field name
fn describe(field: &ContentField, existing: Option<&FragmentContent>) -> String {
    let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string);

    non_empty(&field.description)
        .or_else(|| non_empty(&field.label))
        .or_else(|| {
            existing
                .and_then(|content| content.get(&field.name))
                .and_then(|value| match value {
                    Value::Null => None,
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
        })
        .unwrap_or_else(|| field.name.clone())
}

/// Build the output-format instructions appended to a rendered prompt
///
/// Returns an empty string when no model is bound.
///
/// ```rust
/// use prompt_variants::{augment, ContentModel};
///
/// let model = ContentModel::from_json(
///     r#"{"fields": [{"name": "title", "label": "Title", "type": "text"}]}"#,
/// ).unwrap();
/// let text = augment(Some(&model), None);
/// assert!(text.contains(r#"- "title": Title"#));
/// assert!(text.contains(r#"- "variationName""#));
/// assert_eq!(augment(None, None), "");
/// ```
pub fn augment(model: Option<&ContentModel>, existing: Option<&FragmentContent>) -> String {
    let Some(model) = model else {
        return String::new();
    };

    let mut out = String::from(
        "\n\nFormat the response as a JSON array. Each element of the array is one \
         variation: a JSON object with exactly these keys:\n",
    );
    for field in model.text_fields() {
        out.push_str(&format!("- \"{}\": {}\n", field.name, describe(field, existing)));
    }
    out.push_str(&format!(
        "- \"{}\": {}\n",
        VARIATION_NAME_FIELD, VARIATION_NAME_DESCRIPTION
    ));
    out.push_str("Respond with the JSON array only, without any surrounding text.");
    out
}
