#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use canon_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Loading or converting the document failed.
    #[display("Import failed: {}", _0)]
    Core(AppError),

    /// Serializing the project as JSON failed.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// Serializing the project as YAML failed.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// Retrieving a remote document failed.
    #[from(ignore)]
    #[display("Fetch failed: {}", _0)]
    Fetch(String),
}

/// Manual implementation of the standard Error trait.
///
/// `Fetch(String)` holds a plain string, which does not implement
/// `std::error::Error`, so `source()` cannot be derived.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
