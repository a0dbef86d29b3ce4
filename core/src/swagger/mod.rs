#![deny(missing_docs)]

//! # Swagger 2.0 Input
//!
//! - **document**: Typed shims for the Swagger 2.0 document shape.
//! - **refs**: Reference classification and the `trait:` key convention.
//! - **deref**: In-memory resolution of local `$ref` pointers.

pub mod deref;
pub mod document;
pub mod refs;

pub use deref::dereference;
pub use document::{ParamLocation, Parameter, RefOr, Reference, SwaggerDocument};
pub use refs::{is_trait_reference, TraitDescriptor};
