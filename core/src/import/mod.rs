#![deny(missing_docs)]

//! # Swagger Import
//!
//! The mapping pass: a [`LoadedDocument`] goes in, a finished [`Project`]
//! comes out. Nothing here fails; malformed documents are rejected by the
//! loader before mapping starts.
//!
//! - **params / body / responses**: per-location mappers.
//! - **traits**: document-level and per-endpoint trait extraction.
//! - **security**: security definitions and requirements.
//! - **schemas**: named definitions.
//! - **endpoints**: one endpoint per path and method.

pub mod body;
pub mod endpoints;
pub mod example;
pub mod mime;
pub mod naming;
pub mod params;
pub mod responses;
pub mod schemas;
pub mod security;
pub mod traits;

use crate::canon::models::{Contact, ExternalDocs, License};
use crate::canon::{Environment, Project, ProjectBuilder};
use crate::error::AppResult;
use crate::import::endpoints::{map_path, EndpointContext};
use crate::import::security::map_security_definitions;
use crate::import::traits::{known_trait_references, map_document_traits};
use crate::loader::{load_str, LoadOptions, LoadedDocument};
use crate::swagger::document::SwaggerDocument;

/// Protocol used for the environment host when no scheme is declared.
pub const DEFAULT_PROTOCOL: &str = "http";

/// Loads a JSON or YAML document and converts it.
pub fn import_str(text: &str, options: &LoadOptions) -> AppResult<Project> {
    let loaded = load_str(text, options)?;
    Ok(convert(&loaded))
}

/// Converts a loaded document into a [`Project`].
pub fn convert(loaded: &LoadedDocument) -> Project {
    let raw = &loaded.raw;
    let resolved = &loaded.dereferenced;

    let mut builder = ProjectBuilder::new(raw.info.title.as_str())
        .description(raw.info.description.clone().unwrap_or_default())
        .environment(map_environment(raw));

    let trait_mime = endpoints::designated_mime_type(None, &raw.produces);
    for project_trait in map_document_traits(raw, resolved, trait_mime) {
        builder.add_trait(project_trait);
    }

    for schema in schemas::map_schemas(&raw.definitions) {
        builder.add_schema(schema);
    }

    let known_trait_refs = known_trait_references(raw);
    let ctx = EndpointContext {
        raw,
        resolved,
        known_trait_refs: &known_trait_refs,
    };
    for (path, item) in &raw.paths {
        for endpoint in map_path(path, item, &ctx) {
            builder.add_endpoint(endpoint);
        }
    }

    let project = builder.build();
    tracing::info!(
        title = %project.name,
        endpoints = project.endpoints.len(),
        schemas = project.schemas.len(),
        traits = project.traits.len(),
        "converted swagger document"
    );
    project
}

/// Builds the document-wide settings.
fn map_environment(doc: &SwaggerDocument) -> Environment {
    let protocol = doc
        .schemes
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROTOCOL);
    let host = match doc.host.as_deref() {
        Some(host) if !host.is_empty() => format!("{}://{}", protocol, host),
        _ => String::new(),
    };

    Environment {
        summary: doc.info.description.clone().unwrap_or_default(),
        protocols: doc.schemes.clone(),
        base_path: doc.base_path.clone().unwrap_or_default(),
        host,
        version: doc.info.version.clone(),
        external_docs: doc.external_docs.as_ref().map(ExternalDocs::from),
        contact_info: doc.info.contact.as_ref().map(Contact::from),
        license: doc.info.license.as_ref().map(License::from),
        terms_of_service: doc.info.terms_of_service.clone(),
        consumes: doc.consumes.clone(),
        produces: doc.produces.clone(),
        security_schemes: map_security_definitions(&doc.security_definitions),
    }
}
