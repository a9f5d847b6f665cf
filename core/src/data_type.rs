#![deny(missing_docs)]

//! # Data Types
//!
//! The fixed vocabulary of primitive types a parameter may declare, and their
//! JSON Schema rendering.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt::Display;
use std::str::FromStr;

/// A primitive data type usable for path and query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// A plain string. The default for parameters without a declared type.
    #[default]
    String,
    /// A 32-bit integer.
    Integer,
    /// A 64-bit integer.
    Int64,
    /// A double precision number.
    Number,
    /// A single precision number.
    Float,
    /// A boolean.
    Boolean,
    /// A calendar date (`2024-01-31`).
    Date,
    /// A timestamp (`2024-01-31T10:00:00Z`).
    DateTime,
    /// A UUID string.
    Uuid,
    /// An e-mail address string.
    Email,
    /// Raw bytes, typically a file part.
    Binary,
}

impl DataType {
    /// Returns the canonical name used in definition files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Int64 => "int64",
            DataType::Number => "number",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::DateTime => "date-time",
            DataType::Uuid => "uuid",
            DataType::Email => "email",
            DataType::Binary => "binary",
        }
    }

    /// Renders the JSON Schema fragment for this type.
    pub fn schema(&self) -> Value {
        match self {
            DataType::String => json!({ "type": "string" }),
            DataType::Integer => json!({ "type": "integer", "format": "int32" }),
            DataType::Int64 => json!({ "type": "integer", "format": "int64" }),
            DataType::Number => json!({ "type": "number", "format": "double" }),
            DataType::Float => json!({ "type": "number", "format": "float" }),
            DataType::Boolean => json!({ "type": "boolean" }),
            DataType::Date => json!({ "type": "string", "format": "date" }),
            DataType::DateTime => json!({ "type": "string", "format": "date-time" }),
            DataType::Uuid => json!({ "type": "string", "format": "uuid" }),
            DataType::Email => json!({ "type": "string", "format": "email" }),
            DataType::Binary => json!({ "type": "string", "format": "binary" }),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "string" | "str" => Ok(DataType::String),
            "integer" | "int" | "int32" => Ok(DataType::Integer),
            "int64" | "long" => Ok(DataType::Int64),
            "number" | "double" => Ok(DataType::Number),
            "float" => Ok(DataType::Float),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "date-time" | "datetime" => Ok(DataType::DateTime),
            "uuid" => Ok(DataType::Uuid),
            "email" => Ok(DataType::Email),
            "binary" | "file" => Ok(DataType::Binary),
            _ => Err(AppError::InvalidDefinition(format!(
                "Unknown data type '{}'",
                s
            ))),
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
