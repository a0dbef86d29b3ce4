#![deny(missing_docs)]

//! # Convert Command
//!
//! Loads a Swagger 2.0 document and prints (or writes) the canonical project.

use crate::error::CliResult;
use crate::source::Source;
use canon_core::{import_str, LoadOptions, Project};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialization of the converted project.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Infers the format from an output file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path or http(s) URL of the Swagger 2.0 document (JSON or YAML).
    pub input: String,

    /// Write the project to this file instead of stdout.
    #[clap(long, short, env = "SWAGGER_CANON_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format. Defaults to the output file extension, then JSON.
    #[clap(long, short, value_enum, env = "SWAGGER_CANON_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Inline every reference before mapping. No traits are attached to endpoints.
    #[clap(long, env = "SWAGGER_CANON_EXPAND")]
    pub expand: bool,
}

impl ConvertArgs {
    /// The effective output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Json)
    }
}

/// Executes the convert command.
pub fn execute(args: &ConvertArgs) -> CliResult<()> {
    let text = Source::parse(&args.input).read()?;
    let options = LoadOptions {
        expand: args.expand,
    };
    let project = import_str(&text, &options)?;
    let rendered = render(&project, args.output_format())?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote project");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Serializes a project.
pub fn render(project: &Project, format: OutputFormat) -> CliResult<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(project)?,
        OutputFormat::Yaml => serde_yaml::to_string(project)?,
    })
}
