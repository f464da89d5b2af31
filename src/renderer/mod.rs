//! Prompt renderer for turning templates into model input
//!
//! This module substitutes placeholder values into a template and strips
//! definitions and comments, producing the text sent to the model.

pub mod config;
pub mod prompt;

pub use config::{RenderConfig, DEFAULT_SENTINEL};
pub use prompt::{render, render_with_config};
