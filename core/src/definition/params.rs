//! Query and path parameter declarations.
//!
//! A parameter may be written positionally, as `[name, type?, required?]`, or
//! as a mapping. Missing or `null` positions take their defaults; an empty
//! positional entry declares nothing and is skipped.

use crate::data_type::DataType;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Where a parameter is carried on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Templated path segment.
    Path,
}

impl ParamLocation {
    /// Value of the OpenAPI `in` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Path => "path",
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// Declared type, `None` when the declaration left it out.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    /// Declared requiredness, `None` when the declaration left it out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl ParamSpec {
    /// Creates a parameter with default type and requiredness.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            required: None,
        }
    }

    /// Sets the declared type.
    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Marks the parameter as required (or not).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Declared type, or `string`.
    pub fn effective_type(&self) -> DataType {
        self.data_type.unwrap_or_default()
    }

    /// Declared requiredness, or `false`.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Decodes a positional declaration.
    ///
    /// Returns `Ok(None)` for an empty declaration.
    pub fn from_positional(values: &[Value]) -> AppResult<Option<Self>> {
        let Some(first) = values.first() else {
            return Ok(None);
        };
        let name = first.as_str().ok_or_else(|| {
            AppError::InvalidDefinition(format!("Parameter name must be a string, got {}", first))
        })?;

        let data_type = match values.get(1) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.parse::<DataType>()?),
            Some(other) => {
                return Err(AppError::InvalidDefinition(format!(
                    "Parameter '{}' type must be a string, got {}",
                    name, other
                )))
            }
        };

        let required = match values.get(2) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                return Err(AppError::InvalidDefinition(format!(
                    "Parameter '{}' required flag must be a boolean, got {}",
                    name, other
                )))
            }
        };

        Ok(Some(Self {
            name: name.to_string(),
            data_type,
            required,
        }))
    }
}

impl From<&str> for ParamSpec {
    fn from(name: &str) -> Self {
        ParamSpec::new(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawParam {
    Positional(Vec<Value>),
    Named {
        name: String,
        #[serde(rename = "type", default)]
        data_type: Option<DataType>,
        #[serde(default)]
        required: Option<bool>,
    },
}

/// Deserializes a parameter list, dropping empty positional entries.
pub(crate) fn deserialize_params<'de, D>(deserializer: D) -> Result<Vec<ParamSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawParam>>::deserialize(deserializer)?.unwrap_or_default();
    let mut params = Vec::with_capacity(raw.len());
    for entry in raw {
        match entry {
            RawParam::Positional(values) => {
                if let Some(spec) =
                    ParamSpec::from_positional(&values).map_err(serde::de::Error::custom)?
                {
                    params.push(spec);
                }
            }
            RawParam::Named {
                name,
                data_type,
                required,
            } => params.push(ParamSpec {
                name,
                data_type,
                required,
            }),
        }
    }
    Ok(params)
}
