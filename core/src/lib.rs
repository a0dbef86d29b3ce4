#![deny(missing_docs)]

//! # Canon Core
//!
//! Converts Swagger 2.0 documents into a canonical, format-agnostic API model.

/// Shared error types.
pub mod error;

/// Decoding, version checks and dereferencing.
pub mod loader;

/// Typed Swagger 2.0 document model and reference helpers.
pub mod swagger;

/// Canonical Project model.
pub mod canon;

/// Swagger to canonical mapping.
pub mod import;

pub use canon::{
    Endpoint, Environment, Method, ObjectSchema, Project, ProjectBuilder, RequestBody, Response,
    Schema, SecuredBy, SecuritySchemes, Trait,
};
pub use error::{AppError, AppResult};
pub use import::{convert, import_str};
pub use loader::{load_str, load_value, parse_text, LoadOptions, LoadedDocument};
pub use swagger::SwaggerDocument;
