//! Placeholder discovery for prompt templates
//!
//! This module finds every `{{...}}` occurrence in a template, parses it and
//! folds the results into a [`Registry`] that describes the inputs the
//! template expects.
//!
//! # Example
//!
//! ```text
//! {{# Product copy for the spring campaign}}
//! {{@tone, label="Tone", type=select, values=formal,casual, default=casual}}
//! {{@product, label="Product name"}}
//!
//! Write three {{tone}} headlines for {{product}}.
//! ```

mod registry;
mod scanner;
mod values;

pub use registry::{
    build_registry, build_registry_with_diagnostics, Diagnostic, Registry, RegistryEntry,
};
pub use scanner::{scan, Occurrence};
pub use values::{ParameterValue, ParameterValues, ValuesError};
