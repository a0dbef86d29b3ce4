#![deny(missing_docs)]

//! # Canonical Model
//!
//! - **models**: Project, Endpoint, Schema, Trait and their parts.
//! - **builder**: Accumulates a Project over one conversion pass.

pub mod builder;
pub mod models;

pub use builder::ProjectBuilder;
pub use models::{
    Endpoint, Environment, Method, ObjectSchema, Project, RequestBody, Response, Schema,
    SecuredBy, SecuritySchemes, Trait,
};
