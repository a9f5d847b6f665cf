#![deny(missing_docs)]

//! # Routedoc Core
//!
//! Translates endpoint definitions (methods, URL, payload shapes, parameters
//! and tags) into the paths and component schemas of an OpenAPI document.

/// Shared error types.
pub mod error;

/// Primitive parameter types.
pub mod data_type;

/// Role tag classification.
pub mod role;

/// Endpoint definitions.
pub mod definition;

/// Component naming strategies.
pub mod naming;

/// OpenAPI document and schema shapes.
pub mod oas;

/// The pre-process / register / assemble pipeline.
pub mod converter;

/// Definition file parsing.
pub mod loader;

pub use converter::DefinitionConverter;
pub use data_type::DataType;
pub use definition::{EndpointDefinition, HttpMethod, ParamLocation, ParamSpec, Payload};
pub use error::{AppError, AppResult};
pub use loader::{parse_definitions, DefinitionFormat};
pub use naming::{ComponentNamer, ComponentNames, ContentHashNamer, RandomCodeNamer};
pub use oas::{ApiInfo, Registration, SpecificationDocument};
pub use role::{RequestShape, ResponseShape, RoleTag};
