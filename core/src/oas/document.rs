#![deny(missing_docs)]

//! # Specification Document
//!
//! The accumulating OpenAPI document. One instance is created per run, every
//! processed definition adds components and a path entry to it, and the
//! caller serializes it once the batch is done.
//!
//! The document assumes a single writer: all mutation goes through `&mut self`.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

/// OpenAPI version emitted at the document root.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Document-level metadata emitted under `info` and `servers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API version (not the OpenAPI version).
    pub version: String,
    /// Optional description.
    pub description: Option<String>,
    /// Server URLs, in the order given.
    pub servers: Vec<String>,
}

impl ApiInfo {
    /// Creates metadata with the two required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            servers: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a server URL.
    pub fn with_server(mut self, url: impl Into<String>) -> Self {
        self.servers.push(url.into());
        self
    }

    /// Rejects an empty title or version.
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in [("title", &self.title), ("version", &self.version)] {
            if value.trim().is_empty() {
                return Err(AppError::General(format!(
                    "OpenAPI info requires a non-empty '{}'",
                    field
                )));
            }
        }
        Ok(())
    }

    fn to_value(&self) -> Value {
        let mut info = json!({ "title": self.title, "version": self.version });
        if let (Some(desc), Value::Object(obj)) = (&self.description, &mut info) {
            obj.insert("description".to_string(), json!(desc));
        }
        info
    }

    fn servers_value(&self) -> Option<Value> {
        if self.servers.is_empty() {
            return None;
        }
        let servers = self.servers.iter().map(|url| json!({ "url": url }));
        Some(Value::Array(servers.collect()))
    }
}

/// Outcome of [`SpecificationDocument::register_component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The name was new and the fragment was stored.
    Inserted,
    /// The name existed with an identical fragment; nothing changed.
    Skipped,
    /// The name existed with a different fragment; the first one was kept.
    Conflict,
}

/// The OpenAPI document being built.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationDocument {
    info: ApiInfo,
    components: IndexMap<String, Value>,
    paths: IndexMap<String, Map<String, Value>>,
}

impl SpecificationDocument {
    /// Creates an empty document after validating `info`.
    pub fn new(info: ApiInfo) -> AppResult<Self> {
        info.validate()?;
        Ok(Self {
            info,
            components: IndexMap::new(),
            paths: IndexMap::new(),
        })
    }

    /// Document metadata.
    pub fn info(&self) -> &ApiInfo {
        &self.info
    }

    /// True if a component schema is registered under `name`.
    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered component schema for `name`.
    pub fn component(&self, name: &str) -> Option<&Value> {
        self.components.get(name)
    }

    /// All component schemas, in registration order.
    pub fn components(&self) -> &IndexMap<String, Value> {
        &self.components
    }

    /// Path item registered for `path`.
    pub fn path(&self, path: &str) -> Option<&Map<String, Value>> {
        self.paths.get(path)
    }

    /// All path items, in registration order.
    pub fn paths(&self) -> &IndexMap<String, Map<String, Value>> {
        &self.paths
    }

    /// Registers a component schema.
    ///
    /// An existing name is never overwritten. A differing fragment under an
    /// existing name is reported as [`Registration::Conflict`] and logged.
    pub fn register_component(&mut self, name: &str, fragment: Value) -> Registration {
        match self.components.get(name) {
            None => {
                debug!(component = name, "registered component schema");
                self.components.insert(name.to_string(), fragment);
                Registration::Inserted
            }
            Some(existing) if *existing == fragment => {
                debug!(component = name, "component already registered");
                Registration::Skipped
            }
            Some(_) => {
                warn!(
                    component = name,
                    "component name collision; keeping the first registered schema"
                );
                Registration::Conflict
            }
        }
    }

    /// Registers (or extends) a path item.
    ///
    /// Path parameters are always marked required. Within one call a
    /// `(name, in)` pair may appear only once; when `path` already exists,
    /// new parameters are appended and operations are merged per method.
    pub fn register_path(
        &mut self,
        path: &str,
        parameters: Option<Vec<Value>>,
        operations: Map<String, Value>,
    ) -> AppResult<()> {
        let parameters = parameters
            .map(|params| clean_parameters(path, params))
            .transpose()?;

        let path_item = self.paths.entry(path.to_string()).or_default();

        if let Some(params) = parameters {
            let existing = path_item
                .entry("parameters".to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = existing {
                for param in params {
                    let key = parameter_key(&param);
                    if !list.iter().any(|p| parameter_key(p) == key) {
                        list.push(param);
                    }
                }
            }
        }

        for (method, operation) in operations {
            if path_item.contains_key(&method) {
                warn!(path, method = %method, "replacing existing operation");
            }
            path_item.insert(method, operation);
        }

        debug!(path, "registered path");
        Ok(())
    }

    /// Renders the document as an OpenAPI JSON value.
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("openapi".to_string(), json!(OPENAPI_VERSION));
        doc.insert("info".to_string(), self.info.to_value());
        if let Some(servers) = self.info.servers_value() {
            doc.insert("servers".to_string(), servers);
        }

        let mut paths = Map::new();
        for (path, item) in &self.paths {
            paths.insert(path.clone(), Value::Object(item.clone()));
        }
        doc.insert("paths".to_string(), Value::Object(paths));

        let mut schemas = Map::new();
        for (name, schema) in &self.components {
            schemas.insert(name.clone(), schema.clone());
        }
        doc.insert("components".to_string(), json!({ "schemas": schemas }));

        Value::Object(doc)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    /// YAML.
    pub fn to_yaml_string(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(&self.to_value())?)
    }

    /// Converts into the typed `utoipa` OpenAPI model.
    ///
    /// The typed model requires `responses` on every operation, so operations
    /// emitted without one get an empty `responses` object in the converted
    /// copy. Fails if a caller-supplied payload schema does not fit the model.
    pub fn to_openapi(&self) -> AppResult<utoipa::openapi::OpenApi> {
        let mut value = self.to_value();
        if let Some(Value::Object(paths)) = value.get_mut("paths") {
            for item in paths.values_mut() {
                fill_missing_responses(item);
            }
        }
        serde_json::from_value(value).map_err(|e| {
            AppError::Serialization(format!("Document does not fit the OpenAPI model: {}", e))
        })
    }
}

fn fill_missing_responses(path_item: &mut Value) {
    let Value::Object(item) = path_item else {
        return;
    };
    for (key, operation) in item.iter_mut() {
        if key == "parameters" {
            continue;
        }
        if let Value::Object(op) = operation {
            op.entry("responses".to_string()).or_insert_with(|| json!({}));
        }
    }
}

fn parameter_key(param: &Value) -> (Option<&str>, Option<&str>) {
    (
        param.get("name").and_then(Value::as_str),
        param.get("in").and_then(Value::as_str),
    )
}

fn clean_parameters(path: &str, params: Vec<Value>) -> AppResult<Vec<Value>> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(params.len());
    for mut param in params {
        let (name, location) = parameter_key(&param);
        let (name, location) = (
            name.unwrap_or_default().to_string(),
            location.unwrap_or_default().to_string(),
        );
        if !seen.insert((name.clone(), location.clone())) {
            return Err(AppError::InvalidDefinition(format!(
                "Duplicate parameter '{}' in {} for path '{}'",
                name, location, path
            )));
        }
        if location == "path" {
            if let Value::Object(obj) = &mut param {
                obj.insert("required".to_string(), json!(true));
            }
        }
        cleaned.push(param);
    }
    Ok(cleaned)
}
