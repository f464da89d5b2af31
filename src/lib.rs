//! Prompt Variants - placeholder templates for generative prompts
//!
//! This library parses `{{...}}` placeholders in free-form prompt text,
//! renders templates with caller-supplied values, and decodes a model's
//! (possibly truncated) JSON response into content variants.
//!
//! # Example
//!
//! ```rust
//! use prompt_variants::{build_registry, decode_response, render, ParameterValues};
//!
//! let template = r#"
//!     {{@tone, label="Tone", default=friendly}}
//!     Write two {{tone}} headlines about {{topic}}.
//! "#;
//!
//! let registry = build_registry(template);
//! assert_eq!(registry.inputs().len(), 2);
//!
//! let values = ParameterValues::new().with("tone", "playful").with("topic", "tea");
//! assert_eq!(render(template, &values), "Write two playful headlines about tea.");
//!
//! let variants = decode_response(r#"[{"headline":"Steep thoughts"},{"headline":"Tea-rific"#);
//! assert_eq!(variants.len(), 1);
//! ```

pub mod content_model;
pub mod decoder;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod template;

pub use content_model::{augment, ContentField, ContentModel, ContentModelError, FieldType, FragmentContent};
pub use decoder::{decode, decode_response, Variant, VariantContent, VariantId};
pub use error::ParseError;
pub use parser::{parse_expression, Modifier, Parameter, PlaceholderNode};
pub use renderer::{render, render_with_config, RenderConfig};
pub use template::{
    build_registry, build_registry_with_diagnostics, Diagnostic, ParameterValue, ParameterValues,
    Registry, RegistryEntry, ValuesError,
};

/// Everything needed to turn a template into the final model input
#[derive(Debug, Clone, Default)]
pub struct PromptRequest<'a> {
    /// Values supplied by the user
    pub values: ParameterValues,
    /// Output schema the response should follow
    pub content_model: Option<&'a ContentModel>,
    /// Current field values of the content being varied
    pub existing: Option<&'a FragmentContent>,
    /// Rendering options
    pub config: RenderConfig,
}

impl<'a> PromptRequest<'a> {
    /// Create a new request with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the supplied values
    pub fn with_values(mut self, values: ParameterValues) -> Self {
        self.values = values;
        self
    }

    /// Bind a content model, with optional existing content
    pub fn with_content_model(
        mut self,
        model: &'a ContentModel,
        existing: Option<&'a FragmentContent>,
    ) -> Self {
        self.content_model = Some(model);
        self.existing = existing;
        self
    }

    /// Set the rendering configuration
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }
}

/// Produce the final prompt text for a template
///
/// Declared defaults fill blank inputs, the template is rendered, and the
/// content model instructions are appended when a model is bound.
///
/// ```rust
/// use prompt_variants::{generate_prompt, ContentModel, ParameterValues, PromptRequest};
///
/// let model = ContentModel::from_json(r#"{"fields": [{"name": "title", "type": "text"}]}"#).unwrap();
/// let request = PromptRequest::new()
///     .with_values(ParameterValues::new().with("n", 3i64))
///     .with_content_model(&model, None);
///
/// let prompt = generate_prompt("Write {{n}} titles.", &request);
/// assert!(prompt.starts_with("Write 3 titles.\n\n"));
/// assert!(prompt.contains("\"variationName\""));
/// ```
pub fn generate_prompt(template: &str, request: &PromptRequest<'_>) -> String {
    let registry = build_registry(template);
    let values = registry.resolve_values(&request.values);
    let mut prompt = render_with_config(template, &values, &request.config);
    prompt.push_str(&augment(request.content_model, request.existing));
    prompt
}
