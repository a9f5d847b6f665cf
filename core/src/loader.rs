#![deny(missing_docs)]

//! # Definition Loading
//!
//! Reads endpoint definitions from YAML or JSON text. A file holds either a
//! bare list of definitions or a mapping with a `definitions` list.

use crate::definition::EndpointDefinition;
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

/// Text format of a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl DefinitionFormat {
    /// Picks the format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DefinitionFormat::Json),
            "yaml" | "yml" => Some(DefinitionFormat::Yaml),
            _ => None,
        }
    }
}

/// Parses every definition in `content`.
pub fn parse_definitions(
    content: &str,
    format: DefinitionFormat,
) -> AppResult<Vec<EndpointDefinition>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Parse into a generic value first so errors name the offending entry.
    let raw: serde_json::Value = match format {
        DefinitionFormat::Json => serde_json::from_str(content)?,
        DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
    };

    let list = match &raw {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(list) => list,
        serde_json::Value::Object(obj) => match obj.get("definitions") {
            Some(serde_json::Value::Array(list)) => list,
            _ => {
                return Err(AppError::InvalidDefinition(
                    "Expected a 'definitions' list".to_string(),
                ))
            }
        },
        other => {
            return Err(AppError::InvalidDefinition(format!(
                "Expected a list of definitions, got {}",
                other
            )))
        }
    };

    let mut definitions = Vec::with_capacity(list.len());
    for (index, entry) in list.iter().enumerate() {
        let def = EndpointDefinition::deserialize(entry).map_err(|e| {
            AppError::InvalidDefinition(format!("Definition #{}: {}", index + 1, e))
        })?;
        definitions.push(def);
    }
    Ok(definitions)
}
