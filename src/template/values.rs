//! Caller-supplied placeholder values
//!
//! Values come from a form or a config file. The renderer only needs to know
//! whether a value is blank and how to print it.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a value file
#[derive(Error, Debug)]
pub enum ValuesError {
    #[error("Failed to read values file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse values TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse values JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A single value for a placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl ParameterValue {
    /// Blank values render as the sentinel
    ///
    /// Null and empty or whitespace-only text are blank. Numbers never are,
    /// zero included.
    pub fn is_blank(&self) -> bool {
        match self {
            ParameterValue::Null => true,
            ParameterValue::Text(s) => s.trim().is_empty(),
            ParameterValue::Integer(_) | ParameterValue::Float(_) => false,
        }
    }
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterValue::Integer(n) => write!(f, "{}", n),
            ParameterValue::Float(n) => write!(f, "{}", n),
            ParameterValue::Text(s) => write!(f, "{}", s),
            ParameterValue::Null => Ok(()),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue::Text(s.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        ParameterValue::Text(s)
    }
}

impl From<i64> for ParameterValue {
    fn from(n: i64) -> Self {
        ParameterValue::Integer(n)
    }
}

impl From<f64> for ParameterValue {
    fn from(n: f64) -> Self {
        ParameterValue::Float(n)
    }
}

/// Identifier to value map handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterValues {
    values: HashMap<String, ParameterValue>,
}

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load values from a file; `.json` files are read as JSON, anything else as TOML
    pub fn from_file(path: &Path) -> Result<Self, ValuesError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Parse a flat TOML table of `identifier = value`
    pub fn from_toml(content: &str) -> Result<Self, ValuesError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a flat JSON object of `"identifier": value`
    pub fn from_json(content: &str) -> Result<Self, ValuesError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Builder-style insert
    pub fn with(mut self, identifier: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(identifier, value);
        self
    }

    pub fn insert(&mut self, identifier: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.insert(identifier.into(), value.into());
    }

    pub fn get(&self, identifier: &str) -> Option<&ParameterValue> {
        self.values.get(identifier)
    }

    /// The value for `identifier` unless it is missing or blank
    pub fn non_blank(&self, identifier: &str) -> Option<&ParameterValue> {
        self.get(identifier).filter(|v| !v.is_blank())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for ParameterValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_policy() {
        assert!(ParameterValue::Null.is_blank());
        assert!(ParameterValue::from("").is_blank());
        assert!(ParameterValue::from(" \t\n").is_blank());
        assert!(!ParameterValue::from("x").is_blank());
        assert!(!ParameterValue::Integer(0).is_blank());
        assert!(!ParameterValue::Float(0.0).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(ParameterValue::Integer(0).to_string(), "0");
        assert_eq!(ParameterValue::Integer(-3).to_string(), "-3");
        assert_eq!(ParameterValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ParameterValue::from("hi").to_string(), "hi");
        assert_eq!(ParameterValue::Null.to_string(), "");
    }

    #[test]
    fn test_iter_visits_every_value() {
        let values: ParameterValues = [("tone", "warm"), ("topic", "tea")].into_iter().collect();
        let mut seen: Vec<_> = values.iter().map(|(k, v)| (k, v.to_string())).collect();
        seen.sort();
        assert_eq!(
            seen,
            vec![("tone", "warm".to_string()), ("topic", "tea".to_string())]
        );
    }

    #[test]
    fn test_from_toml() {
        let values = ParameterValues::from_toml(
            r#"
            tone = "friendly"
            count = 0
            ratio = 0.5
            "#,
        )
        .expect("Should parse");
        assert_eq!(values.get("tone"), Some(&ParameterValue::from("friendly")));
        assert_eq!(values.get("count"), Some(&ParameterValue::Integer(0)));
        assert_eq!(values.get("ratio"), Some(&ParameterValue::Float(0.5)));
    }

    #[test]
    fn test_from_json_with_null() {
        let values = ParameterValues::from_json(r#"{"tone": null, "count": 3, "name": "Ada"}"#)
            .expect("Should parse");
        assert_eq!(values.get("tone"), Some(&ParameterValue::Null));
        assert_eq!(values.get("count"), Some(&ParameterValue::Integer(3)));
        assert!(values.non_blank("tone").is_none());
        assert!(values.non_blank("count").is_some());
    }

    #[test]
    fn test_from_toml_rejects_nested_tables() {
        assert!(ParameterValues::from_toml("[section]\nkey = 1").is_err());
    }

    #[test]
    fn test_collect_from_pairs() {
        let values: ParameterValues = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(values.len(), 2);
    }
}
