#![deny(missing_docs)]

//! # Endpoint Definitions
//!
//! The internal description of one HTTP route waiting to be documented.
//!
//! Definitions are usually loaded from YAML/JSON files, but can also be built
//! in code through the `with_*` methods.

/// HTTP verbs.
pub mod method;

/// Query and path parameters.
pub mod params;

pub use method::HttpMethod;
pub use params::{ParamLocation, ParamSpec};

use crate::error::AppResult;
use crate::role::{RoleTag, APPLICATION_JSON};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A payload descriptor: the JSON Schema of one request or response item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    /// Wraps a JSON Schema fragment.
    pub fn new(schema: Value) -> Self {
        Self(schema)
    }

    /// The wrapped schema.
    pub fn schema(&self) -> &Value {
        &self.0
    }

    /// Consumes the payload, returning the schema.
    pub fn into_schema(self) -> Value {
        self.0
    }
}

impl From<Value> for Payload {
    fn from(schema: Value) -> Self {
        Payload::new(schema)
    }
}

fn default_request_type() -> String {
    APPLICATION_JSON.to_string()
}

/// One HTTP route with its payload shapes, parameters and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDefinition {
    /// Path template, e.g. `/widgets/{id}`.
    pub url: String,
    /// HTTP verbs served on the path, without duplicates.
    #[serde(default, deserialize_with = "method::deserialize_methods")]
    pub methods: Vec<HttpMethod>,
    /// Request/response role tag.
    #[serde(default)]
    pub rr_type: RoleTag,
    /// Request payload, if the endpoint accepts one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Payload>,
    /// Response payload, if the endpoint returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_obj: Option<Payload>,
    /// Query parameters, in declaration order.
    #[serde(
        default,
        alias = "query_param",
        deserialize_with = "params::deserialize_params"
    )]
    pub query_params: Vec<ParamSpec>,
    /// Path parameters, in declaration order.
    #[serde(default, deserialize_with = "params::deserialize_params")]
    pub path_params: Vec<ParamSpec>,
    /// Documentation tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// The endpoint answers with a bare status message.
    #[serde(default)]
    pub only_message: bool,
    /// Request component name, assigned during pre-processing.
    #[serde(skip)]
    pub request_component: Option<String>,
    /// Response component name, assigned during pre-processing.
    #[serde(skip)]
    pub response_component: Option<String>,
    /// Media type of the request body, resolved from the role during assembly.
    #[serde(skip, default = "default_request_type")]
    pub request_type: String,
}

impl EndpointDefinition {
    /// Creates a definition for `url` with no methods and the default role.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            methods: Vec::new(),
            rr_type: RoleTag::default(),
            request_body: None,
            response_obj: None,
            query_params: Vec::new(),
            path_params: Vec::new(),
            tags: Vec::new(),
            only_message: false,
            request_component: None,
            response_component: None,
            request_type: default_request_type(),
        }
    }

    /// Adds an HTTP method. Duplicates are ignored.
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        method::push_unique(&mut self.methods, method);
        self
    }

    /// Adds HTTP methods given by name, e.g. `["GET", "post"]`.
    pub fn with_methods<'a, I>(mut self, methods: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for raw in methods {
            method::push_unique(&mut self.methods, raw.parse()?);
        }
        Ok(self)
    }

    /// Sets the role tag.
    pub fn with_role(mut self, tag: impl Into<String>) -> Self {
        self.rr_type = RoleTag::new(tag);
        self
    }

    /// Sets the request payload schema.
    pub fn with_request_body(mut self, schema: Value) -> Self {
        self.request_body = Some(Payload::new(schema));
        self
    }

    /// Sets the response payload schema.
    pub fn with_response(mut self, schema: Value) -> Self {
        self.response_obj = Some(Payload::new(schema));
        self
    }

    /// Appends a query parameter.
    pub fn with_query_param(mut self, param: impl Into<ParamSpec>) -> Self {
        self.query_params.push(param.into());
        self
    }

    /// Appends a path parameter.
    pub fn with_path_param(mut self, param: impl Into<ParamSpec>) -> Self {
        self.path_params.push(param.into());
        self
    }

    /// Appends a documentation tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Marks the endpoint as answering with a bare message.
    pub fn with_only_message(mut self) -> Self {
        self.only_message = true;
        self
    }
}
