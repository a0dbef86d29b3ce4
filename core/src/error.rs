//! # Error Handling
//!
//! Provides the unified `AppError` enum for the load phase.
//!
//! Only loading can fail: the mapping pass works on an already validated,
//! dereferenced document and treats every missing optional field as empty.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// JSON decoding or typed ingestion failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML decoding failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The document does not declare a supported `swagger` version.
    #[from(ignore)]
    #[display("Unsupported Document Version: {_0}")]
    UnsupportedVersion(String),

    /// A local `$ref` points at a location that does not exist.
    #[from(ignore)]
    #[display("Unresolved Reference: {_0}")]
    UnresolvedReference(String),

    /// Inlining references would produce more values than the given limit.
    #[from(ignore)]
    #[display("Expansion Limit Exceeded: dereferencing needs more than {_0} values")]
    ExpansionLimit(usize),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
