//! Template substitution

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::ast::Modifier;
use crate::parser::parse_expression;
use crate::renderer::config::RenderConfig;
use crate::template::{scan, Occurrence, ParameterValues};

/// Two or more consecutive blank (whitespace-only) lines; group 1 is the line ending
static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\r?\n)(?:[ \t\r]*\n){2,}").expect("blank line pattern is valid")
});

/// Render a template with the default configuration
///
/// ```rust
/// use prompt_variants::{render, ParameterValues};
///
/// assert_eq!(render("Hello {{name}}!", &ParameterValues::new()), "Hello <please_select>!");
///
/// let values = ParameterValues::new().with("name", "Ada");
/// assert_eq!(render("{{@name, label=Name}}\nHello {{name}}!", &values), "Hello Ada!");
/// ```
pub fn render(template: &str, values: &ParameterValues) -> String {
    render_with_config(template, values, &RenderConfig::default())
}

/// Render a template with custom configuration
///
/// Definitions and comments disappear, references become their value or the
/// sentinel. Never fails.
pub fn render_with_config(template: &str, values: &ParameterValues, config: &RenderConfig) -> String {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for occurrence in scan(template) {
        out.push_str(&template[last..occurrence.span.start]);
        out.push_str(&substitute(&occurrence, values, config));
        last = occurrence.span.end;
    }
    out.push_str(&template[last..]);

    let out = if config.collapse_blank_lines {
        BLANK_LINE_RUN.replace_all(&out, "${1}${1}")
    } else {
        Cow::Borrowed(out.as_str())
    };
    out.trim().to_string()
}

fn substitute<'v>(
    occurrence: &Occurrence<'_>,
    values: &'v ParameterValues,
    config: &'v RenderConfig,
) -> Cow<'v, str> {
    let node = match parse_expression(occurrence.text) {
        Ok(node) => node,
        Err(_) => {
            // The registry skips malformed occurrences, so no value can be bound to them
            debug!(placeholder = occurrence.text, "rendering malformed placeholder");
            return match occurrence.modifier() {
                Modifier::Reference => Cow::Borrowed(config.sentinel.as_str()),
                _ => Cow::Borrowed(""),
            };
        }
    };

    if node.modifier.is_metadata() {
        return Cow::Borrowed("");
    }

    match values.non_blank(&node.identifier) {
        Some(value) => Cow::Owned(value.to_string()),
        None => Cow::Borrowed(config.sentinel.as_str()),
    }
}
