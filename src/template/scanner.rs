//! Occurrence discovery for `{{...}}` spans
//!
//! The scanner is deliberately looser than the grammar: it finds every
//! brace-free `{{ ... }}` span and leaves validation to the parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::ast::{Modifier, Span};

/// `{{`, optional modifier, body without braces, `}}`
static OCCURRENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([@#]?)[^{}]*\}\}").expect("occurrence pattern is valid")
});

/// A raw placeholder match inside a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'t> {
    /// Byte range of the whole match in the template
    pub span: Span,
    /// The matched text, delimiters included
    pub text: &'t str,
    modifier: Modifier,
}

impl<'t> Occurrence<'t> {
    /// Modifier as seen by the scanner, before any grammar check
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }
}

/// Find every placeholder occurrence in `template`, in source order
pub fn scan(template: &str) -> impl Iterator<Item = Occurrence<'_>> + '_ {
    OCCURRENCE.captures_iter(template).filter_map(|caps| {
        let whole = caps.get(0)?;
        let modifier = match caps.get(1).map(|m| m.as_str()) {
            Some("@") => Modifier::Definition,
            Some("#") => Modifier::Comment,
            _ => Modifier::Reference,
        };
        Some(Occurrence {
            span: whole.range(),
            text: whole.as_str(),
            modifier,
        })
    })
}
