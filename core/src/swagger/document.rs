#![deny(missing_docs)]

//! # Swagger Document Shims
//!
//! Typed deserialization layer for the Swagger 2.0 document shape.
//!
//! Every field the importer reads is optional and defaults to empty. Reusable
//! entries (`parameters`, `responses`) are modelled as [`RefOr`], so a `$ref`
//! pointer is a distinct variant instead of a map that happens to carry a
//! `$ref` key. Specification extensions (`x-...`) in keyed sections are dropped
//! at ingestion.

use crate::canon::models::Method;
use crate::swagger::refs::{has_trait_marker, is_trait_reference};
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Either a `$ref` pointer or an inline value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `{"$ref": "..."}` object.
    Ref(Reference),
    /// An inline definition.
    T(T),
}

impl<T> RefOr<T> {
    /// Returns the inline value, if any.
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            RefOr::T(value) => Some(value),
            RefOr::Ref(_) => None,
        }
    }

    /// Returns the reference, if this entry is a trait reference.
    pub fn trait_reference(&self) -> Option<&Reference> {
        match self {
            RefOr::Ref(r) if r.is_trait_reference() => Some(r),
            _ => None,
        }
    }
}

/// A JSON Reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reference {
    /// The pointer, e.g. `#/parameters/trait:paged:limit`.
    #[serde(rename = "$ref")]
    pub ref_location: String,
}

impl Reference {
    /// Whether the pointer targets a `parameters` or `responses` section.
    pub fn is_trait_reference(&self) -> bool {
        is_trait_reference(&self.ref_location)
    }

    /// Whether the pointer names a `trait:` qualified entry.
    pub fn has_trait_marker(&self) -> bool {
        has_trait_marker(&self.ref_location)
    }
}

/// Root of a Swagger 2.0 document.
#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerDocument {
    /// Declared version, e.g. `2.0`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub swagger: Option<String>,
    /// Metadata about the API.
    #[serde(default)]
    pub info: Info,
    /// Host (name or ip) serving the API, without scheme.
    pub host: Option<String>,
    /// Base path relative to the host.
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    /// Transfer protocols (`http`, `https`, `ws`, `wss`).
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Default request mime types.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Default response mime types.
    #[serde(default)]
    pub produces: Vec<String>,
    /// Named security scheme definitions.
    #[serde(
        rename = "securityDefinitions",
        default,
        deserialize_with = "without_extensions"
    )]
    pub security_definitions: IndexMap<String, SecurityDefinition>,
    /// Named schema definitions, kept as raw JSON subtrees.
    #[serde(default, deserialize_with = "without_extensions")]
    pub definitions: IndexMap<String, Value>,
    /// Document-level reusable parameters.
    #[serde(default, deserialize_with = "without_extensions")]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    /// Document-level reusable responses.
    #[serde(default, deserialize_with = "without_extensions")]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Path items keyed by path template.
    #[serde(default, deserialize_with = "without_extensions")]
    pub paths: IndexMap<String, PathItem>,
    /// Document-level external documentation.
    #[serde(rename = "externalDocs")]
    pub external_docs: Option<ExternalDocs>,
}

impl SwaggerDocument {
    /// Deserializes a decoded JSON tree.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// Metadata about the API (Info Object).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// The title of the API.
    #[serde(default)]
    pub title: String,
    /// A description of the API.
    pub description: Option<String>,
    /// The version of the API (not of the specification).
    #[serde(default, deserialize_with = "string_or_number")]
    pub version: Option<String>,
    /// A URL to the Terms of Service for the API.
    #[serde(rename = "termsOfService")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    pub contact: Option<Contact>,
    /// License information.
    pub license: Option<License>,
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    /// Name of the contact person/organization.
    pub name: Option<String>,
    /// URL pointing to the contact information.
    pub url: Option<String>,
    /// Email address of the contact person/organization.
    pub email: Option<String>,
}

/// License information for the exposed API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct License {
    /// License name.
    pub name: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

/// Allows referencing an external resource for extended documentation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExternalDocs {
    /// A description of the target documentation.
    pub description: Option<String>,
    /// The URL for the target documentation.
    #[serde(default)]
    pub url: String,
}

/// Security scheme definition, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityDefinition {
    /// API key passed in a header or the query string.
    #[serde(rename = "apiKey")]
    ApiKey(ApiKeyDefinition),
    /// OAuth2 (Swagger 2.0 single-flow form).
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Definition),
    /// HTTP basic authentication.
    #[serde(rename = "basic")]
    Basic(BasicDefinition),
    /// Any other declared type.
    #[serde(other)]
    Unsupported,
}

/// API Key definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKeyDefinition {
    /// Header or query parameter name.
    #[serde(default)]
    pub name: String,
    /// Location (`header` or `query`).
    #[serde(rename = "in")]
    pub location: Option<ParamLocation>,
    /// Description.
    pub description: Option<String>,
}

/// OAuth2 definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OAuth2Definition {
    /// Flow (`implicit`, `password`, `application`, `accessCode`).
    pub flow: Option<String>,
    /// Authorization URL.
    #[serde(rename = "authorizationUrl")]
    pub authorization_url: Option<String>,
    /// Token URL.
    #[serde(rename = "tokenUrl")]
    pub token_url: Option<String>,
    /// Available scopes and their descriptions.
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
    /// Description.
    pub description: Option<String>,
}

/// Basic authentication definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicDefinition {
    /// Description.
    pub description: Option<String>,
}

/// Location of a parameter (`in`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Path template segment.
    Path,
    /// Form field (`application/x-www-form-urlencoded` or `multipart/form-data`).
    FormData,
    /// Request payload.
    Body,
    /// Anything else.
    Other(String),
}

impl From<String> for ParamLocation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "query" => ParamLocation::Query,
            "header" => ParamLocation::Header,
            "path" => ParamLocation::Path,
            "formData" => ParamLocation::FormData,
            "body" => ParamLocation::Body,
            _ => ParamLocation::Other(value),
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Path => "path",
            ParamLocation::FormData => "formData",
            ParamLocation::Body => "body",
            ParamLocation::Other(other) => other,
        };
        f.write_str(s)
    }
}

/// An inline parameter definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: Option<String>,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: Option<ParamLocation>,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// A brief description of the parameter.
    pub description: Option<String>,
    /// Payload schema (`in: body` only).
    pub schema: Option<Value>,
    /// Every other key (`type`, `format`, `items`, `enum`, bounds, extensions, ...).
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Parameter {
    /// Whether the parameter is declared at `location`.
    pub fn is_in(&self, location: &ParamLocation) -> bool {
        self.location.as_ref() == Some(location)
    }
}

/// A response definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// A short description of the response.
    pub description: Option<String>,
    /// Body schema.
    pub schema: Option<Value>,
    /// Examples, usually keyed by mime type.
    pub examples: Option<Value>,
}

/// An operation on a path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    /// Short summary.
    pub summary: Option<String>,
    /// Verbose explanation.
    pub description: Option<String>,
    /// Grouping tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Deprecation flag.
    #[serde(default)]
    pub deprecated: bool,
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Additional external documentation.
    #[serde(rename = "externalDocs")]
    pub external_docs: Option<ExternalDocs>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Responses keyed by status code (or `default`).
    #[serde(default, deserialize_with = "without_extensions")]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Security requirements: scheme name to scopes.
    pub security: Option<Vec<IndexMap<String, Vec<String>>>>,
    /// Request mime types, overriding the document defaults.
    pub consumes: Option<Vec<String>>,
    /// Response mime types, overriding the document defaults.
    pub produces: Option<Vec<String>>,
}

/// A Path Item: shared parameters plus one operation per HTTP method.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    /// Parameters common to all operations in this path.
    pub parameters: Vec<RefOr<Parameter>>,
    /// Operations in declaration order.
    pub operations: IndexMap<Method, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = PathItem::default();

        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse path parameters: {}", e))
                })?;
                continue;
            }
            let Some(method) = Method::parse(&key) else {
                tracing::debug!(key = %key, "ignoring non-operation path item entry");
                continue;
            };
            let operation = serde_json::from_value::<Operation>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
            })?;
            item.operations.insert(method, operation);
        }

        Ok(item)
    }
}

/// Deserializes a keyed section, dropping `x-` extension entries before typing
/// the remaining values.
fn without_extensions<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut items = IndexMap::with_capacity(raw.len());

    for (key, value) in raw {
        if key.starts_with("x-") {
            continue;
        }
        let item = serde_json::from_value::<T>(value)
            .map_err(|e| DeError::custom(format!("Failed to parse entry '{}': {}", key, e)))?;
        items.insert(key, item);
    }

    Ok(items)
}

/// Accepts `2.0` as well as `"2.0"`: YAML authors rarely quote versions.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(DeError::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}
