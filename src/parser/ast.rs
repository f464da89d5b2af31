//! Syntax tree types for placeholder expressions

use serde::Serialize;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// How a placeholder occurrence participates in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// `{{@name, ...}}` declares metadata for an input
    Definition,
    /// `{{# free text}}` is an author note, never rendered
    Comment,
    /// `{{name}}` is a substitution point
    Reference,
}

impl Modifier {
    /// The sigil written after `{{`, if any
    pub fn sigil(&self) -> Option<char> {
        match self {
            Modifier::Definition => Some('@'),
            Modifier::Comment => Some('#'),
            Modifier::Reference => None,
        }
    }

    /// Definitions and comments are metadata and never appear in output
    pub fn is_metadata(&self) -> bool {
        !matches!(self, Modifier::Reference)
    }
}

/// A `key=value` pair from a placeholder's parameter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One parsed `{{...}}` occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderNode {
    pub modifier: Modifier,
    /// Placeholder name; for comments, the comment text
    pub identifier: String,
    /// Parameters in the order they were written
    pub parameters: Vec<Parameter>,
}

impl PlaceholderNode {
    /// Look up a parameter value by key (first match)
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

impl std::fmt::Display for PlaceholderNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{{")?;
        if let Some(sigil) = self.modifier.sigil() {
            write!(f, "{}", sigil)?;
        }
        write!(f, "{}", self.identifier)?;
        for p in &self.parameters {
            write!(f, ", {}=\"{}\"", p.key, p.value)?;
        }
        write!(f, "}}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_definition() {
        let node = PlaceholderNode {
            modifier: Modifier::Definition,
            identifier: "tone".to_string(),
            parameters: vec![Parameter::new("label", "Tone")],
        };
        assert_eq!(node.to_string(), r#"{{@tone, label="Tone"}}"#);
    }

    #[test]
    fn test_parameter_lookup() {
        let node = PlaceholderNode {
            modifier: Modifier::Reference,
            identifier: "count".to_string(),
            parameters: vec![Parameter::new("default", "3")],
        };
        assert_eq!(node.parameter("default"), Some("3"));
        assert_eq!(node.parameter("label"), None);
    }

    #[test]
    fn test_metadata_modifiers() {
        assert!(Modifier::Definition.is_metadata());
        assert!(Modifier::Comment.is_metadata());
        assert!(!Modifier::Reference.is_metadata());
    }
}
