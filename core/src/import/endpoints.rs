#![deny(missing_docs)]

//! # Endpoint Building
//!
//! One [`Endpoint`] per path and method, combining the raw operation (where
//! trait references are still visible) with its dereferenced counterpart.

use crate::canon::models::ExternalDocs;
use crate::canon::{Endpoint, Method, ObjectSchema};
use crate::import::body::{has_parameter_in, map_request_body};
use crate::import::mime::{
    preferred_mime_type, without_defaults, APPLICATION_JSON, MULTIPART_FORM_DATA,
};
use crate::import::naming::{operation_id, truncate_summary};
use crate::import::params::{map_headers, map_path_params, map_query_string};
use crate::import::responses::{map_responses, ResponseContext};
use crate::import::security::map_secured_by;
use crate::import::traits::map_endpoint_traits;
use crate::swagger::document::{Operation, ParamLocation, PathItem, SwaggerDocument};
use indexmap::IndexSet;
use std::collections::HashSet;

/// Document-wide inputs of the endpoint pass.
#[derive(Debug, Clone, Copy)]
pub struct EndpointContext<'a> {
    /// The document with references intact.
    pub raw: &'a SwaggerDocument,
    /// The dereferenced document.
    pub resolved: &'a SwaggerDocument,
    /// Pointers to document-level responses materialized as traits.
    pub known_trait_refs: &'a HashSet<String>,
}

/// Builds the endpoints of one path, in declaration order.
pub fn map_path(path: &str, item: &PathItem, ctx: &EndpointContext<'_>) -> Vec<Endpoint> {
    let resolved_item = ctx.resolved.paths.get(path);
    let path_level = map_path_params(
        &item.parameters,
        resolved_item.map(|i| i.parameters.as_slice()),
    );

    item.operations
        .iter()
        .map(|(method, op)| {
            let resolved_op = resolved_item.and_then(|i| i.operations.get(method));
            map_operation(path, *method, op, resolved_op, &path_level, ctx)
        })
        .collect()
}

/// Builds a single endpoint.
///
/// `path_level` holds the path parameters shared by every method of the path;
/// operation-level path parameters override them by name.
pub fn map_operation(
    path: &str,
    method: Method,
    op: &Operation,
    resolved_op: Option<&Operation>,
    path_level: &ObjectSchema,
    ctx: &EndpointContext<'_>,
) -> Endpoint {
    let resolved_params = resolved_op.map(|o| o.parameters.as_slice());

    // Trait names come from the raw entries before anything gets resolved.
    let traits = map_endpoint_traits(&op.parameters, &op.responses);

    let mut implied = Vec::new();
    if has_parameter_in(&op.parameters, resolved_params, &ParamLocation::Body) {
        implied.push(APPLICATION_JSON);
    }
    if has_parameter_in(&op.parameters, resolved_params, &ParamLocation::FormData) {
        implied.push(MULTIPART_FORM_DATA);
    }
    let explicit_consumes = op.consumes.iter().flatten().map(String::as_str);
    let consumes = without_defaults(
        implied.into_iter().chain(explicit_consumes),
        &ctx.raw.consumes,
    );
    let produces = without_defaults(
        op.produces.iter().flatten().map(String::as_str),
        &ctx.raw.produces,
    );

    let body = if method.allows_body() {
        map_request_body(&op.parameters, resolved_params)
    } else {
        None
    };

    let mut path_params = path_level.clone();
    path_params.merge(map_path_params(&op.parameters, resolved_params));

    let headers = map_headers(&op.parameters, true);
    let query_string = map_query_string(resolved_params.unwrap_or(&op.parameters), true);

    let mime_type = designated_mime_type(op.produces.as_deref(), &ctx.raw.produces);
    let responses = map_responses(
        &op.responses,
        &ResponseContext {
            skip_trait_refs: true,
            resolved: resolved_op.map(|o| &o.responses),
            known_trait_refs: ctx.known_trait_refs,
            mime_type,
        },
    );

    let secured_by = map_secured_by(op.security.as_deref(), &ctx.raw.security_definitions);

    Endpoint {
        method,
        path: path.to_string(),
        summary: op.summary.as_deref().map(truncate_summary),
        description: op.description.clone(),
        tags: op
            .tags
            .iter()
            .cloned()
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect(),
        deprecated: op.deprecated,
        operation_id: operation_id(op.operation_id.as_deref(), method, path),
        external_docs: op.external_docs.as_ref().map(ExternalDocs::from),
        consumes,
        produces,
        path_params,
        query_string,
        headers,
        body,
        responses,
        secured_by,
        traits,
    }
}

/// Mime type whose example is kept on responses: the preferred entry of the
/// operation's `produces`, else of the document's, else `application/json`.
pub fn designated_mime_type<'a>(
    operation_produces: Option<&'a [String]>,
    document_produces: &'a [String],
) -> &'a str {
    operation_produces
        .and_then(preferred_mime_type)
        .or_else(|| preferred_mime_type(document_produces))
        .unwrap_or(APPLICATION_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::traits::known_trait_references;
    use crate::loader::{load_str, LoadOptions};
    use serde_json::json;

    const DOC: &str = r##"
swagger: "2.0"
info: {title: Endpoints}
consumes: [application/json]
produces: [application/json]
securityDefinitions:
  oauth2Scheme:
    type: oauth2
    flow: implicit
    authorizationUrl: https://auth.example.com
    scopes: {read: Read, write: Write}
parameters:
  trait:paged:limit: {name: limit, in: query, type: integer}
  trait:secured:auth: {name: Authorization, in: header, type: string}
  userId: {name: userId, in: path, type: string}
responses:
  trait:secured:401: {description: Unauthorized}
paths:
  /users/{userId}:
    parameters:
      - $ref: '#/parameters/userId'
    get:
      summary: Fetch a user
      tags: [users, users, admin]
      produces: [application/xml, application/json]
      parameters:
        - $ref: '#/parameters/trait:paged:limit'
        - $ref: '#/parameters/trait:secured:auth'
        - {name: body, in: body, schema: {type: object}}
        - {name: verbose, in: query, type: boolean}
        - {name: X-Trace, in: header, type: string, required: true}
      responses:
        200:
          description: OK
          schema: {$ref: '#/definitions/User'}
          examples:
            application/json: {id: 1}
        401:
          $ref: '#/responses/trait:secured:401'
      security:
        - oauth2Scheme: [read, write]
        - undefinedScheme: []
    post:
      operationId: createUserThing
      consumes: [application/json, text/csv, text/csv]
      parameters:
        - {name: userId, in: path, type: integer, required: false}
        - {name: file, in: formData, type: file, required: true}
      responses:
        201: {description: Created}
definitions:
  User: {type: object}
"##;

    fn endpoints() -> Vec<Endpoint> {
        let loaded = load_str(DOC, &LoadOptions::default()).unwrap();
        let known = known_trait_references(&loaded.raw);
        let ctx = EndpointContext {
            raw: &loaded.raw,
            resolved: &loaded.dereferenced,
            known_trait_refs: &known,
        };
        let path = "/users/{userId}";
        map_path(path, &loaded.raw.paths[path], &ctx)
    }

    #[test]
    fn test_get_endpoint() {
        let endpoints = endpoints();
        let get = &endpoints[0];

        assert_eq!(get.method, Method::Get);
        assert_eq!(get.operation_id, "get_users_userId");
        assert_eq!(get.summary.as_deref(), Some("Fetch a user"));
        assert_eq!(get.tags, vec!["users", "admin"]);
        assert!(get.body.is_none());
        assert_eq!(get.consumes, Vec::<String>::new());
        assert_eq!(get.produces, vec!["application/xml"]);
        assert_eq!(get.traits, vec!["paged", "secured"]);

        assert_eq!(get.path_params.properties["userId"], json!({"type": "string"}));
        assert!(get.path_params.required.contains("userId"));

        assert_eq!(get.headers.properties.keys().collect::<Vec<_>>(), vec!["X-Trace"]);
        assert_eq!(
            get.query_string.properties.keys().collect::<Vec<_>>(),
            vec!["limit", "verbose"]
        );

        assert_eq!(get.responses.len(), 1);
        assert_eq!(get.responses[0].codes, vec!["200"]);
        assert_eq!(get.responses[0].example.as_deref(), Some("{\n    \"id\": 1\n}"));

        assert_eq!(
            get.secured_by.oauth2,
            Some(vec!["read".to_string(), "write".to_string()])
        );
    }

    #[test]
    fn test_post_endpoint() {
        let endpoints = endpoints();
        let post = &endpoints[1];

        assert_eq!(post.operation_id, "createUserThing");
        assert_eq!(post.consumes, vec!["multipart/form-data", "text/csv"]);
        assert_eq!(post.path_params.properties["userId"], json!({"type": "integer"}));
        assert!(post.path_params.required.contains("userId"));
        assert!(post.secured_by.is_none());

        let body = post.body.as_ref().unwrap();
        assert_eq!(
            body.body,
            json!({"properties": {"file": {"type": "file"}}, "required": ["file"]})
        );
    }

    #[test]
    fn test_path_level_parameters_do_not_leak_between_methods() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints[0].path_params.properties["userId"],
            json!({"type": "string"})
        );
        assert_eq!(
            endpoints[1].path_params.properties["userId"],
            json!({"type": "integer"})
        );
    }

    #[test]
    fn test_designated_mime_type() {
        let op = vec!["application/xml".to_string()];
        let doc = vec!["text/plain".to_string(), "application/json".to_string()];
        assert_eq!(designated_mime_type(Some(&op[..]), &doc), "application/xml");
        assert_eq!(designated_mime_type(None, &doc), "application/json");
        assert_eq!(designated_mime_type(Some(&[][..]), &[]), "application/json");
    }
}
