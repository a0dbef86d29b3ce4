//! # Security Mapping
//!
//! Buckets `securityDefinitions` by type and resolves per-operation security
//! requirements against them.

use crate::canon::models::{
    ApiKeyCredential, ApiKeyScheme, BasicScheme, OAuth2Scheme, OAuth2Scope, SecuredBy,
    SecuritySchemes,
};
use crate::swagger::document::{ParamLocation, SecurityDefinition};
use indexmap::IndexMap;

/// Maps named security definitions into one record per scheme type.
///
/// API keys accumulate; a later `oauth2` or `basic` definition replaces an
/// earlier one.
pub fn map_security_definitions(
    definitions: &IndexMap<String, SecurityDefinition>,
) -> SecuritySchemes {
    let mut schemes = SecuritySchemes::default();

    for (name, definition) in definitions {
        match definition {
            SecurityDefinition::ApiKey(def) => {
                let credential = ApiKeyCredential {
                    external_name: name.clone(),
                    name: def.name.clone(),
                    value: String::new(),
                    description: def.description.clone(),
                };
                let api_key = schemes.api_key.get_or_insert_with(ApiKeyScheme::default);
                match def.location {
                    Some(ParamLocation::Header) => api_key.headers.push(credential),
                    _ => api_key.query_string.push(credential),
                }
            }
            SecurityDefinition::OAuth2(def) => {
                let scopes: Vec<OAuth2Scope> = def
                    .scopes
                    .iter()
                    .map(|(scope, description)| OAuth2Scope {
                        name: scope.clone(),
                        value: description.clone(),
                    })
                    .collect();
                schemes.oauth2 = Some(OAuth2Scheme {
                    name: name.clone(),
                    authorization_url: def.authorization_url.clone().unwrap_or_default(),
                    token_url: def.token_url.clone().unwrap_or_default(),
                    flow: def.flow.clone(),
                    scopes: (!scopes.is_empty()).then_some(scopes),
                });
            }
            SecurityDefinition::Basic(def) => {
                schemes.basic = Some(BasicScheme {
                    name: name.clone(),
                    value: String::new(),
                    description: def.description.clone().unwrap_or_default(),
                });
            }
            SecurityDefinition::Unsupported => {
                tracing::debug!(scheme = %name, "ignoring security definition of unsupported type");
            }
        }
    }

    schemes
}

/// Resolves an operation's security requirements.
///
/// Scheme names missing from `definitions` are skipped.
pub fn map_secured_by(
    security: Option<&[IndexMap<String, Vec<String>>]>,
    definitions: &IndexMap<String, SecurityDefinition>,
) -> SecuredBy {
    let mut secured_by = SecuredBy::default();

    for requirement in security.unwrap_or_default() {
        for (scheme, scopes) in requirement {
            match definitions.get(scheme) {
                Some(SecurityDefinition::ApiKey(_)) => secured_by.api_key = Some(true),
                Some(SecurityDefinition::Basic(_)) => secured_by.basic = Some(true),
                Some(SecurityDefinition::OAuth2(_)) => secured_by.oauth2 = Some(scopes.clone()),
                Some(SecurityDefinition::Unsupported) => {
                    tracing::debug!(scheme = %scheme, "security requirement uses an unsupported scheme type");
                }
                None => {
                    tracing::debug!(scheme = %scheme, "security requirement names an undefined scheme");
                }
            }
        }
    }

    secured_by
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definitions() -> IndexMap<String, SecurityDefinition> {
        serde_json::from_value(json!({
            "headerKey": {"type": "apiKey", "name": "X-Api-Key", "in": "header", "description": "Header key"},
            "queryKey": {"type": "apiKey", "name": "api_key", "in": "query"},
            "oauth2Scheme": {
                "type": "oauth2",
                "flow": "accessCode",
                "authorizationUrl": "https://auth.example.com/authorize",
                "tokenUrl": "https://auth.example.com/token",
                "scopes": {"read": "Read access", "write": "Write access"}
            },
            "basicAuth": {"type": "basic"}
        }))
        .unwrap()
    }

    #[test]
    fn test_definitions_are_bucketed_by_type() {
        let schemes = map_security_definitions(&definitions());

        let api_key = schemes.api_key.unwrap();
        assert_eq!(api_key.headers.len(), 1);
        assert_eq!(api_key.headers[0].external_name, "headerKey");
        assert_eq!(api_key.headers[0].name, "X-Api-Key");
        assert_eq!(api_key.headers[0].value, "");
        assert_eq!(api_key.query_string[0].name, "api_key");

        let oauth2 = schemes.oauth2.unwrap();
        assert_eq!(oauth2.name, "oauth2Scheme");
        assert_eq!(oauth2.flow.as_deref(), Some("accessCode"));
        let scopes: Vec<&str> = oauth2
            .scopes
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(scopes, vec!["read", "write"]);

        let basic = schemes.basic.unwrap();
        assert_eq!(basic.name, "basicAuth");
        assert_eq!(basic.description, "");
    }

    #[test]
    fn test_later_oauth2_definition_wins_and_empty_scopes_are_dropped() {
        let defs: IndexMap<String, SecurityDefinition> = serde_json::from_value(json!({
            "first": {"type": "oauth2", "flow": "implicit", "authorizationUrl": "https://a", "scopes": {"x": "y"}},
            "second": {"type": "oauth2", "flow": "application", "tokenUrl": "https://t", "scopes": {}}
        }))
        .unwrap();

        let oauth2 = map_security_definitions(&defs).oauth2.unwrap();
        assert_eq!(oauth2.name, "second");
        assert_eq!(oauth2.authorization_url, "");
        assert_eq!(oauth2.token_url, "https://t");
        assert!(oauth2.scopes.is_none());
    }

    #[test]
    fn test_secured_by_oauth2_scopes() {
        let security: Vec<IndexMap<String, Vec<String>>> =
            serde_json::from_value(json!([{"oauth2Scheme": ["read", "write"]}])).unwrap();

        let secured = map_secured_by(Some(&security), &definitions());
        assert_eq!(secured.oauth2, Some(vec!["read".to_string(), "write".to_string()]));
        assert_eq!(secured.api_key, None);
    }

    #[test]
    fn test_secured_by_skips_undefined_schemes() {
        let security: Vec<IndexMap<String, Vec<String>>> =
            serde_json::from_value(json!([{"missing": ["read"]}])).unwrap();

        assert!(map_secured_by(Some(&security), &definitions()).is_none());
        assert!(map_secured_by(None, &definitions()).is_none());
    }

    #[test]
    fn test_secured_by_every_scheme_of_a_requirement() {
        let security: Vec<IndexMap<String, Vec<String>>> =
            serde_json::from_value(json!([{"headerKey": [], "basicAuth": []}])).unwrap();

        let secured = map_secured_by(Some(&security), &definitions());
        assert_eq!(secured.api_key, Some(true));
        assert_eq!(secured.basic, Some(true));
        assert!(secured.oauth2.is_none());
    }
}
