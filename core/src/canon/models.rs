#![deny(missing_docs)]

//! # Canonical Models
//!
//! Format-agnostic API representation handed to downstream renderers.
//!
//! These structs are produced by the importer and never mutated afterwards.
//! They serialize to camelCase JSON/YAML so the CLI can emit them directly.

use crate::swagger::document;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// HTTP methods recognised inside a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `get`
    Get,
    /// `put`
    Put,
    /// `post`
    Post,
    /// `delete`
    Delete,
    /// `options`
    Options,
    /// `head`
    Head,
    /// `patch`
    Patch,
}

impl Method {
    /// Parses a path item key. Matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(Method::Get),
            "put" => Some(Method::Put),
            "post" => Some(Method::Post),
            "delete" => Some(Method::Delete),
            "options" => Some(Method::Options),
            "head" => Some(Method::Head),
            "patch" => Some(Method::Patch),
            _ => None,
        }
    }

    /// Lower-case name as written in the source document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
        }
    }

    /// GET and HEAD never carry a request body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The aggregate root of a conversion pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// API title.
    pub name: String,
    /// API description.
    pub description: String,
    /// Document-wide settings.
    pub environment: Environment,
    /// Endpoints in document order, unique by (path, method).
    pub endpoints: Vec<Endpoint>,
    /// Named schemas in document order.
    pub schemas: Vec<Schema>,
    /// Reusable request/response fragments.
    pub traits: Vec<Trait>,
}

impl Project {
    /// Looks up an endpoint by path template and method.
    pub fn endpoint(&self, path: &str, method: Method) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|e| e.path == path && e.method == method)
    }

    /// Looks up a trait by name.
    pub fn trait_named(&self, name: &str) -> Option<&Trait> {
        self.traits.iter().find(|t| t.name == name)
    }
}

/// Document-wide settings shared by every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Short summary (the API description).
    pub summary: String,
    /// Declared transfer protocols.
    pub protocols: Vec<String>,
    /// Base path prefix.
    pub base_path: String,
    /// `<protocol>://<host>`, empty when no host is declared.
    pub host: String,
    /// API version.
    pub version: Option<String>,
    /// External documentation link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Contact information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Contact>,
    /// License information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// Terms of service URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Default request mime types.
    pub consumes: Vec<String>,
    /// Default response mime types.
    pub produces: Vec<String>,
    /// Security schemes bucketed by type.
    pub security_schemes: SecuritySchemes,
}

/// External documentation link.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalDocs {
    /// Description of the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target URL.
    pub url: String,
}

impl From<&document::ExternalDocs> for ExternalDocs {
    fn from(docs: &document::ExternalDocs) -> Self {
        Self {
            description: docs.description.clone(),
            url: docs.url.clone(),
        }
    }
}

/// Contact information. Only populated fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contact {
    /// Contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&document::Contact> for Contact {
    fn from(contact: &document::Contact) -> Self {
        Self {
            name: contact.name.clone(),
            url: contact.url.clone(),
            email: contact.email.clone(),
        }
    }
}

/// License information. Only populated fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct License {
    /// License name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// License URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&document::License> for License {
    fn from(license: &document::License) -> Self {
        Self {
            name: license.name.clone(),
            url: license.url.clone(),
        }
    }
}

/// An object-typed schema built from individual parameters.
///
/// `required` is an ordered set, so a name can never be listed twice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    /// Always `object`.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Field schemas keyed by parameter name.
    pub properties: IndexMap<String, Value>,
    /// Names of mandatory fields.
    pub required: IndexSet<String>,
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: IndexMap::new(),
            required: IndexSet::new(),
        }
    }
}

impl ObjectSchema {
    /// Adds (or replaces) a field.
    pub fn insert(&mut self, name: impl Into<String>, field: Value, required: bool) {
        let name = name.into();
        if required {
            self.required.insert(name.clone());
        }
        self.properties.insert(name, field);
    }

    /// Merges `other` into `self`; fields of `other` win on name conflicts.
    pub fn merge(&mut self, other: ObjectSchema) {
        self.properties.extend(other.properties);
        self.required.extend(other.required);
    }

    /// True when no field is defined.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Body schema.
    pub body: Value,
    /// Example payload, pretty printed with 4-space indentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Body description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A response body shared by one or more status codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Status codes served by this body.
    pub codes: Vec<String>,
    /// Body schema (`{}` when none is declared).
    pub body: Value,
    /// Example payload, pretty printed with 4-space indentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Response description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Which security schemes protect an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecuredBy {
    /// API key authentication required.
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<bool>,
    /// Basic authentication required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<bool>,
    /// OAuth2 required, with these scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<Vec<String>>,
}

impl SecuredBy {
    /// True when the endpoint is not secured.
    pub fn is_none(&self) -> bool {
        self.api_key.is_none() && self.basic.is_none() && self.oauth2.is_none()
    }
}

/// A single path + method pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// HTTP method.
    pub method: Method,
    /// Path template.
    pub path: String,
    /// Summary, at most 139 characters.
    pub summary: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Tags, without duplicates.
    pub tags: Vec<String>,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Explicit or derived operation id.
    pub operation_id: String,
    /// External documentation link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Request mime types not already in the document defaults.
    pub consumes: Vec<String>,
    /// Response mime types not already in the document defaults.
    pub produces: Vec<String>,
    /// Path parameters; every field is required.
    pub path_params: ObjectSchema,
    /// Query string parameters.
    pub query_string: ObjectSchema,
    /// Header parameters.
    pub headers: ObjectSchema,
    /// Request body (never set for GET/HEAD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Responses in document order.
    pub responses: Vec<Response>,
    /// Security requirements by scheme type.
    pub secured_by: SecuredBy,
    /// Names of the traits this endpoint uses.
    pub traits: Vec<String>,
}

/// A named schema definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Schema name.
    pub name: String,
    /// Definition without extensions, title or example.
    pub definition: Value,
    /// Hoisted example, pretty printed with 4-space indentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Request side of a trait.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitRequest {
    /// Query string fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<ObjectSchema>,
    /// Headers fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<ObjectSchema>,
}

/// A reusable request/response fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trait {
    /// Identifier (same as the name).
    #[serde(rename = "_id")]
    pub id: String,
    /// Trait name.
    pub name: String,
    /// Request fragment.
    pub request: TraitRequest,
    /// Response fragments.
    pub responses: Vec<Response>,
}

impl Trait {
    /// Creates an empty trait.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            request: TraitRequest::default(),
            responses: Vec::new(),
        }
    }
}

/// Security schemes bucketed by type. At most one oauth2 and one basic record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecuritySchemes {
    /// API key credentials.
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKeyScheme>,
    /// OAuth2 settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2Scheme>,
    /// Basic authentication settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicScheme>,
}

impl SecuritySchemes {
    /// True when no scheme is defined.
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.oauth2.is_none() && self.basic.is_none()
    }
}

/// API key credentials split by location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyScheme {
    /// Header-located keys.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<ApiKeyCredential>,
    /// Query-located keys.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_string: Vec<ApiKeyCredential>,
}

/// One API key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyCredential {
    /// Definition key in `securityDefinitions`.
    pub external_name: String,
    /// Header or query parameter name.
    pub name: String,
    /// Placeholder value.
    pub value: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OAuth2 settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Scheme {
    /// Definition key in `securityDefinitions`.
    pub name: String,
    /// Authorization URL (empty if undeclared).
    pub authorization_url: String,
    /// Token URL (empty if undeclared).
    pub token_url: String,
    /// Flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// Scopes; absent when none are declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<OAuth2Scope>>,
}

/// One OAuth2 scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuth2Scope {
    /// Scope name.
    pub name: String,
    /// Scope description.
    pub value: String,
}

/// Basic authentication settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicScheme {
    /// Definition key in `securityDefinitions`.
    pub name: String,
    /// Placeholder value.
    pub value: String,
    /// Description (empty if undeclared).
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_and_body_rule() {
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("parameters"), None);
        assert!(!Method::Head.allows_body());
        assert!(Method::Patch.allows_body());
    }

    #[test]
    fn test_object_schema_required_is_deduplicated() {
        let mut schema = ObjectSchema::default();
        schema.insert("id", json!({"type": "string"}), true);
        schema.insert("id", json!({"type": "integer"}), true);

        assert_eq!(schema.required.len(), 1);
        assert_eq!(schema.properties["id"], json!({"type": "integer"}));
    }

    #[test]
    fn test_object_schema_merge_overrides() {
        let mut base = ObjectSchema::default();
        base.insert("id", json!({"type": "string"}), true);
        base.insert("slug", json!({"type": "string"}), true);

        let mut overlay = ObjectSchema::default();
        overlay.insert("id", json!({"type": "integer"}), true);

        base.merge(overlay);
        assert_eq!(base.properties["id"], json!({"type": "integer"}));
        assert_eq!(
            base.required.iter().collect::<Vec<_>>(),
            vec!["id", "slug"]
        );
    }

    #[test]
    fn test_object_schema_serialization() {
        let mut schema = ObjectSchema::default();
        schema.insert("q", json!({"type": "string"}), false);
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "object", "properties": {"q": {"type": "string"}}, "required": []})
        );
    }

    #[test]
    fn test_secured_by_serialization() {
        let secured = SecuredBy {
            oauth2: Some(vec!["read".into()]),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&secured).unwrap(), json!({"oauth2": ["read"]}));
        assert!(SecuredBy::default().is_none());
    }
}
