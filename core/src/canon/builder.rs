//! # Project Builder
//!
//! Accumulates the pieces of a [`Project`] during a conversion pass and hands
//! back the finished value exactly once.

use crate::canon::models::{Endpoint, Environment, Method, Project, Schema, Trait};
use indexmap::IndexMap;

/// Builder for [`Project`]. Every field starts empty.
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    name: String,
    description: String,
    environment: Environment,
    endpoints: IndexMap<(String, Method), Endpoint>,
    schemas: Vec<Schema>,
    traits: Vec<Trait>,
}

impl ProjectBuilder {
    /// Starts a project with the given title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the project description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the environment block.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Registers an endpoint. A second endpoint for the same path and method
    /// replaces the first, keeping its position.
    pub fn add_endpoint(&mut self, endpoint: Endpoint) {
        let key = (endpoint.path.clone(), endpoint.method);
        if self.endpoints.contains_key(&key) {
            tracing::debug!(path = %key.0, method = %key.1, "replacing duplicate endpoint");
        }
        self.endpoints.insert(key, endpoint);
    }

    /// Registers a schema.
    pub fn add_schema(&mut self, schema: Schema) {
        self.schemas.push(schema);
    }

    /// Registers a trait.
    pub fn add_trait(&mut self, project_trait: Trait) {
        self.traits.push(project_trait);
    }

    /// Finishes the pass.
    pub fn build(self) -> Project {
        Project {
            name: self.name,
            description: self.description,
            environment: self.environment,
            endpoints: self.endpoints.into_values().collect(),
            schemas: self.schemas,
            traits: self.traits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::models::{ObjectSchema, SecuredBy};

    fn endpoint(path: &str, method: Method, summary: &str) -> Endpoint {
        Endpoint {
            method,
            path: path.to_string(),
            summary: Some(summary.to_string()),
            description: None,
            tags: Vec::new(),
            deprecated: false,
            operation_id: format!("{}_{}", method, path.trim_start_matches('/')),
            external_docs: None,
            consumes: Vec::new(),
            produces: Vec::new(),
            path_params: ObjectSchema::default(),
            query_string: ObjectSchema::default(),
            headers: ObjectSchema::default(),
            body: None,
            responses: Vec::new(),
            secured_by: SecuredBy::default(),
            traits: Vec::new(),
        }
    }

    #[test]
    fn test_empty_builder() {
        let project = ProjectBuilder::new("Empty").build();
        assert_eq!(project.name, "Empty");
        assert!(project.endpoints.is_empty());
        assert!(project.environment.security_schemes.is_empty());
    }

    #[test]
    fn test_endpoints_unique_by_path_and_method() {
        let mut builder = ProjectBuilder::new("T").description("D");
        builder.add_endpoint(endpoint("/a", Method::Get, "first"));
        builder.add_endpoint(endpoint("/b", Method::Get, "other"));
        builder.add_endpoint(endpoint("/a", Method::Post, "post"));
        builder.add_endpoint(endpoint("/a", Method::Get, "second"));

        let project = builder.build();
        assert_eq!(project.description, "D");
        assert_eq!(project.endpoints.len(), 3);
        assert_eq!(project.endpoints[0].summary.as_deref(), Some("second"));
        assert_eq!(
            project.endpoint("/a", Method::Post).unwrap().summary.as_deref(),
            Some("post")
        );
    }
}
