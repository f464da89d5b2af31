//! Prompt Variants CLI
//!
//! Usage:
//!   prompt-variants inputs [FILE]
//!   prompt-variants render [FILE] [--values FILE] [--model FILE] [--sentinel TEXT]
//!   prompt-variants decode [FILE]
//!
//! Options:
//!   -v, --verbose  Log decoder and parser details to stderr
//!   -h, --help     Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, Level};

use prompt_variants::{
    build_registry_with_diagnostics, decode_response, generate_prompt, ContentModel,
    FragmentContent, ParameterValues, PromptRequest, RegistryEntry, RenderConfig,
};

#[derive(Parser)]
#[command(name = "prompt-variants")]
#[command(about = "Placeholder prompt templates and model response decoding")]
struct Cli {
    /// Log parser and decoder details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the inputs a template asks for, in form order
    Inputs {
        /// Template file (reads from stdin if not provided)
        input: Option<PathBuf>,
    },

    /// Render a template into the final prompt
    Render {
        /// Template file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Placeholder values (TOML, or JSON with a .json extension)
        #[arg(long)]
        values: Option<PathBuf>,

        /// Content model describing the structured output (JSON)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Existing field values of the content being varied (JSON object)
        #[arg(short, long, requires = "model")]
        existing: Option<PathBuf>,

        /// Text used for missing values
        #[arg(short, long)]
        sentinel: Option<String>,
    },

    /// Decode a model response into variants (printed as JSON)
    Decode {
        /// Response file (reads from stdin if not provided)
        input: Option<PathBuf>,
    },
}

/// Input listing printed by `inputs`
#[derive(Serialize)]
struct InputSummary<'a> {
    identifier: &'a str,
    label: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    input_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    definition: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<usize>,
}

impl<'a> From<&'a RegistryEntry> for InputSummary<'a> {
    fn from(entry: &'a RegistryEntry) -> Self {
        Self {
            identifier: &entry.identifier,
            label: entry.label(),
            input_type: entry.input_type(),
            default: entry.default_value(),
            description: entry.description(),
            definition: entry.definition,
            order: entry.order,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let result = match cli.command {
        Command::Inputs { input } => run_inputs(input.as_deref()),
        Command::Render {
            input,
            values,
            model,
            existing,
            sentinel,
        } => run_render(
            input.as_deref(),
            values.as_deref(),
            model.as_deref(),
            existing.as_deref(),
            sentinel,
        ),
        Command::Decode { input } => run_decode(input.as_deref()),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("reading file '{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("reading from stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

fn display_name(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("writing JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn run_inputs(input: Option<&Path>) -> Result<(), String> {
    let template = read_input(input)?;
    let (registry, diagnostics) = build_registry_with_diagnostics(&template);

    let filename = display_name(input);
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.format(&template, &filename));
    }

    let inputs: Vec<InputSummary> = registry.inputs().into_iter().map(Into::into).collect();
    print_json(&inputs)
}

fn run_render(
    input: Option<&Path>,
    values: Option<&Path>,
    model: Option<&Path>,
    existing: Option<&Path>,
    sentinel: Option<String>,
) -> Result<(), String> {
    let template = read_input(input)?;

    let values = match values {
        Some(path) => ParameterValues::from_file(path)
            .map_err(|e| format!("loading values '{}': {}", path.display(), e))?,
        None => ParameterValues::new(),
    };
    debug!(count = values.len(), "loaded placeholder values");
    for (identifier, value) in values.iter() {
        debug!(identifier, value = %value, "placeholder value");
    }

    let model = model
        .map(|path| {
            ContentModel::from_file(path)
                .map_err(|e| format!("loading content model '{}': {}", path.display(), e))
        })
        .transpose()?;

    let existing: Option<FragmentContent> = existing
        .map(|path| {
            fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
                .map_err(|e| format!("loading existing content '{}': {}", path.display(), e))
        })
        .transpose()?;

    let mut config = RenderConfig::new();
    if let Some(sentinel) = sentinel {
        config = config.with_sentinel(sentinel);
    }

    let mut request = PromptRequest::new().with_values(values).with_config(config);
    if let Some(model) = &model {
        request = request.with_content_model(model, existing.as_ref());
    }

    println!("{}", generate_prompt(&template, &request));
    Ok(())
}

fn run_decode(input: Option<&Path>) -> Result<(), String> {
    let response = read_input(input)?;
    let variants = decode_response(&response);
    debug!(count = variants.len(), "decoded variants");
    print_json(&variants)
}
