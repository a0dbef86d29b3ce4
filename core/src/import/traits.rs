#![deny(missing_docs)]

//! # Trait Extraction
//!
//! Two passes share the `trait:` naming convention:
//!
//! - **Document level**: global `parameters` and `responses` entries are grouped
//!   by trait name into [`Trait`] fragments.
//! - **Endpoint level**: raw `$ref` entries of an operation name the traits the
//!   endpoint uses.

use crate::canon::Trait;
use crate::import::params::{map_headers, map_query_string};
use crate::import::responses::{map_responses, ResponseContext};
use crate::swagger::document::{ParamLocation, Parameter, RefOr, Response, SwaggerDocument};
use crate::swagger::refs::TraitDescriptor;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

type ResponseBucket = IndexMap<String, RefOr<Response>>;

/// Materializes the document-level traits.
///
/// Query and header parameters are grouped by [`TraitDescriptor::from_parameter_key`],
/// responses by [`TraitDescriptor::from_response_key`] and status code. One
/// trait is emitted per name, in order of first appearance.
pub fn map_document_traits(
    raw: &SwaggerDocument,
    resolved: &SwaggerDocument,
    mime_type: &str,
) -> Vec<Trait> {
    let mut query: IndexMap<String, Vec<RefOr<Parameter>>> = IndexMap::new();
    let mut headers: IndexMap<String, Vec<RefOr<Parameter>>> = IndexMap::new();

    // Global parameters may themselves point at other entries; bucket the
    // dereferenced copies so the location is always known.
    for (key, entry) in &resolved.parameters {
        let Some(param) = entry.as_inline() else {
            continue;
        };
        let bucket = match param.location {
            Some(ParamLocation::Query) => &mut query,
            Some(ParamLocation::Header) => &mut headers,
            _ => continue,
        };
        let name = TraitDescriptor::from_parameter_key(key).name;
        bucket.entry(name).or_default().push(entry.clone());
    }

    let mut raw_responses: IndexMap<String, ResponseBucket> = IndexMap::new();
    let mut resolved_responses: IndexMap<String, ResponseBucket> = IndexMap::new();
    for (key, entry) in &raw.responses {
        let descriptor = TraitDescriptor::from_response_key(key);
        let code = descriptor.code_or_default().to_string();
        if let Some(resolved_entry) = resolved.responses.get(key) {
            resolved_responses
                .entry(descriptor.name.clone())
                .or_default()
                .insert(code.clone(), resolved_entry.clone());
        }
        raw_responses
            .entry(descriptor.name)
            .or_default()
            .insert(code, entry.clone());
    }

    let mut traits: IndexMap<String, Trait> = IndexMap::new();

    for (name, params) in &query {
        traits
            .entry(name.clone())
            .or_insert_with(|| Trait::new(name.as_str()))
            .request
            .query_string = Some(map_query_string(params, false));
    }

    for (name, params) in &headers {
        traits
            .entry(name.clone())
            .or_insert_with(|| Trait::new(name.as_str()))
            .request
            .headers = Some(map_headers(params, false));
    }

    let no_known_refs = HashSet::new();
    for (name, bucket) in &raw_responses {
        let ctx = ResponseContext {
            skip_trait_refs: false,
            resolved: resolved_responses.get(name),
            known_trait_refs: &no_known_refs,
            mime_type,
        };
        traits
            .entry(name.clone())
            .or_insert_with(|| Trait::new(name.as_str()))
            .responses = map_responses(bucket, &ctx);
    }

    traits.into_values().collect()
}

/// Names of the traits referenced by an operation's raw parameters and responses.
///
/// Order of first appearance, parameters before responses, without duplicates.
pub fn map_endpoint_traits(
    params: &[RefOr<Parameter>],
    responses: &IndexMap<String, RefOr<Response>>,
) -> Vec<String> {
    let param_refs = params.iter().filter_map(RefOr::trait_reference);
    let response_refs = responses.values().filter_map(RefOr::trait_reference);

    param_refs
        .chain(response_refs)
        .filter_map(|r| TraitDescriptor::from_reference(&r.ref_location))
        .map(|d| d.name)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Pointers to every document-level response.
///
/// Each of them is materialized by [`map_document_traits`], so an endpoint
/// referencing one uses the trait instead of inlining the response.
pub fn known_trait_references(doc: &SwaggerDocument) -> HashSet<String> {
    doc.responses
        .keys()
        .map(|key| format!("#/responses/{}", encode_pointer_segment(key)))
        .collect()
}

fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
