//! Placeholder registry built from a template
//!
//! Every `{{...}}` occurrence is parsed and folded into one entry per
//! identifier. Definitions (`@`) carry the metadata a form needs to ask for
//! the value; comments (`#`) are recorded but never become inputs.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{trace, warn};

use crate::error::ParseError;
use crate::parser::ast::{Modifier, Parameter, PlaceholderNode, Span};
use crate::parser::parse_expression;
use crate::template::scanner::scan;
use crate::template::values::{ParameterValue, ParameterValues};

/// Everything known about one placeholder identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryEntry {
    pub identifier: String,
    /// Seen at least once as `{{@identifier ...}}`
    pub definition: bool,
    /// Seen at least once as `{{# ...}}`
    pub comment: bool,
    /// Seen at least once as a plain `{{identifier}}`
    #[serde(skip)]
    pub referenced: bool,
    /// Position of the first definition among all definitions in the template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    /// Index of the first occurrence of this identifier in scan order
    #[serde(skip)]
    pub first_seen: usize,
    /// Merged parameters; a repeated key keeps its first position and last value
    pub parameters: Vec<Parameter>,
}

impl RegistryEntry {
    fn new(identifier: &str, first_seen: usize) -> Self {
        Self {
            identifier: identifier.to_string(),
            definition: false,
            comment: false,
            referenced: false,
            order: None,
            first_seen,
            parameters: Vec::new(),
        }
    }

    fn merge_parameters(&mut self, parameters: Vec<Parameter>) {
        for param in parameters {
            match self.parameters.iter_mut().find(|p| p.key == param.key) {
                Some(existing) => existing.value = param.value,
                None => self.parameters.push(param),
            }
        }
    }

    /// Look up a merged parameter
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Display label, falling back to the identifier
    pub fn label(&self) -> &str {
        self.parameter("label").unwrap_or(&self.identifier)
    }

    /// Declared input type (`type=...`), if any
    pub fn input_type(&self) -> Option<&str> {
        self.parameter("type")
    }

    pub fn default_value(&self) -> Option<&str> {
        self.parameter("default")
    }

    pub fn description(&self) -> Option<&str> {
        self.parameter("description")
    }

    /// Whether the entry asks the user for a value
    ///
    /// Comment-only entries are annotations, everything else is an input.
    pub fn is_input(&self) -> bool {
        self.definition || self.referenced
    }
}

/// A placeholder occurrence that failed to parse and was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Byte range of the occurrence in the template
    pub span: Span,
    /// Parse errors with spans in template coordinates
    pub errors: Vec<ParseError>,
}

impl Diagnostic {
    /// Render all errors against the template with ariadne
    pub fn format(&self, template: &str, filename: &str) -> String {
        self.errors
            .iter()
            .map(|e| e.format(template, filename))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Placeholders of one template keyed by identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    entries: HashMap<String, RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<&RegistryEntry> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Entries that need a value, in the order a form should ask for them
    ///
    /// Defined placeholders come first in declaration order. Placeholders
    /// that are only referenced follow in order of first appearance.
    pub fn inputs(&self) -> Vec<&RegistryEntry> {
        let mut inputs: Vec<_> = self.entries.values().filter(|e| e.is_input()).collect();
        inputs.sort_by_key(|e| (e.order.is_none(), e.order, e.first_seen));
        inputs
    }

    /// Fill in declared defaults for inputs the caller left blank
    ///
    /// A non-blank supplied value always wins. Inputs without a usable value
    /// or default are left out so the renderer falls back to the sentinel.
    /// Values for identifiers the template does not mention are kept.
    pub fn resolve_values(&self, supplied: &ParameterValues) -> ParameterValues {
        let mut resolved = supplied.clone();
        for entry in self.inputs() {
            if supplied.non_blank(&entry.identifier).is_some() {
                continue;
            }
            if let Some(default) = entry.default_value().filter(|d| !d.trim().is_empty()) {
                resolved.insert(entry.identifier.clone(), ParameterValue::from(default));
            }
        }
        resolved
    }

    fn fold(&mut self, node: PlaceholderNode, index: usize, next_order: &mut usize) {
        let entry = self
            .entries
            .entry(node.identifier.clone())
            .or_insert_with(|| RegistryEntry::new(&node.identifier, index));

        match node.modifier {
            Modifier::Comment => {
                entry.comment = true;
                return;
            }
            Modifier::Definition => {
                entry.definition = true;
                if entry.order.is_none() {
                    entry.order = Some(*next_order);
                    *next_order += 1;
                }
            }
            Modifier::Reference => entry.referenced = true,
        }
        entry.merge_parameters(node.parameters);
    }
}

/// Build the placeholder registry of a template
///
/// Malformed occurrences are logged and skipped; this never fails.
///
/// ```rust
/// use prompt_variants::build_registry;
///
/// let registry = build_registry("{{@tone, label=Tone}} Write in a {{tone}} voice.");
/// let tone = registry.get("tone").unwrap();
/// assert!(tone.definition);
/// assert_eq!(tone.order, Some(0));
/// assert_eq!(tone.label(), "Tone");
/// ```
pub fn build_registry(template: &str) -> Registry {
    build_registry_with_diagnostics(template).0
}

/// Build the registry and also report every skipped occurrence
pub fn build_registry_with_diagnostics(template: &str) -> (Registry, Vec<Diagnostic>) {
    let mut registry = Registry::new();
    let mut diagnostics = Vec::new();
    let mut next_order = 0;

    for (index, occurrence) in scan(template).enumerate() {
        match parse_expression(occurrence.text) {
            Ok(node) => {
                trace!(identifier = %node.identifier, modifier = ?node.modifier, "placeholder");
                registry.fold(node, index, &mut next_order);
            }
            Err(errors) => {
                warn!(
                    placeholder = occurrence.text,
                    offset = occurrence.span.start,
                    "skipping malformed placeholder: {}",
                    errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join("; ")
                );
                let offset = occurrence.span.start;
                diagnostics.push(Diagnostic {
                    span: occurrence.span,
                    errors: errors.into_iter().map(|e| e.shifted(offset)).collect(),
                });
            }
        }
    }

    (registry, diagnostics)
}
