#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// String errors default to `General`; the other string-carrying variants
/// must be built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON or YAML encoding/decoding failure.
    #[from(ignore)]
    #[display("Serialization Error: {_0}")]
    Serialization(String),

    /// An endpoint definition that cannot be translated (bad verb, bad parameter, ...).
    #[from(ignore)]
    #[display("Invalid Definition: {_0}")]
    InvalidDefinition(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
