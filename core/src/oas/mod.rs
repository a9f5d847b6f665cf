#![deny(missing_docs)]

//! # OpenAPI Output
//!
//! The specification document and the schema fragments written into it.

/// The accumulating specification document.
pub mod document;

/// Envelope, request-body, response and parameter builders.
pub mod shapes;

pub use document::{ApiInfo, Registration, SpecificationDocument};
