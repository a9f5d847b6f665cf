#![deny(missing_docs)]

//! # Schema Shapes
//!
//! Envelope builders that wrap a raw payload schema with the structure the
//! API actually sends, plus the request-body, response and parameter objects
//! that reference the registered components.

use crate::data_type::DataType;
use crate::definition::{EndpointDefinition, ParamLocation};
use crate::error::{AppError, AppResult};
use serde_json::{json, Map, Value};

/// Component describing a bare status message.
pub const MESSAGE_RESPONSE: &str = "MessageResponse";
/// Component describing an error with per-field details.
pub const ERROR_DETAILS_RESPONSE: &str = "ErrorDetailsResponse";

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// `$ref` object pointing at a component schema.
pub fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("{}{}", SCHEMA_REF_PREFIX, name) })
}

fn array_of(items: &Value) -> Value {
    json!({ "type": "array", "items": items })
}

fn status_properties() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("status".to_string(), json!({ "type": "string" }));
    props.insert("code".to_string(), json!({ "type": "string" }));
    props
}

fn envelope(props: Map<String, Value>, required: &[&str]) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!("object"));
    if !required.is_empty() {
        obj.insert("required".to_string(), json!(required));
    }
    obj.insert("properties".to_string(), Value::Object(props));
    Value::Object(obj)
}

/// Request envelope carrying one item under `data`.
pub fn single_request(payload: &Value) -> Value {
    let mut props = Map::new();
    props.insert("data".to_string(), payload.clone());
    envelope(props, &["data"])
}

/// Request envelope carrying an array of items under `data`.
pub fn bulk_request(payload: &Value) -> Value {
    let mut props = Map::new();
    props.insert("data".to_string(), array_of(payload));
    envelope(props, &["data"])
}

/// Response envelope carrying one item under `data`.
pub fn data_response(payload: &Value) -> Value {
    let mut props = status_properties();
    props.insert("data".to_string(), payload.clone());
    envelope(props, &[])
}

/// Response envelope carrying an array of items under `data`.
pub fn bulk_success_response(payload: &Value) -> Value {
    let mut props = status_properties();
    props.insert("data".to_string(), array_of(payload));
    envelope(props, &[])
}

/// Response envelope carrying one page of items and its pagination metadata.
pub fn paginated_response(payload: &Value) -> Value {
    let mut pagination = Map::new();
    for field in ["page", "item_per_page", "total_page", "total"] {
        pagination.insert(field.to_string(), json!({ "type": "integer" }));
    }

    let mut props = status_properties();
    props.insert("data".to_string(), array_of(payload));
    props.insert("pagination".to_string(), envelope(pagination, &[]));
    envelope(props, &[])
}

/// Schema of [`MESSAGE_RESPONSE`].
pub fn message_response() -> Value {
    let mut props = status_properties();
    props.insert("message".to_string(), json!({ "type": "string" }));
    envelope(props, &[])
}

/// Schema of [`ERROR_DETAILS_RESPONSE`].
pub fn error_details_response() -> Value {
    let mut props = status_properties();
    props.insert("message".to_string(), json!({ "type": "string" }));
    props.insert(
        "error".to_string(),
        json!({ "type": "object", "additionalProperties": { "type": "string" } }),
    );
    envelope(props, &[])
}

fn request_component(definition: &EndpointDefinition) -> AppResult<&str> {
    definition.request_component.as_deref().ok_or_else(|| {
        AppError::General(format!(
            "Request component for '{}' was not assigned",
            definition.url
        ))
    })
}

fn response_component(definition: &EndpointDefinition) -> AppResult<&str> {
    definition.response_component.as_deref().ok_or_else(|| {
        AppError::General(format!(
            "Response component for '{}' was not assigned",
            definition.url
        ))
    })
}

/// Request Body Object for `definition`, declared under its resolved media type.
pub fn request_body(definition: &EndpointDefinition, is_bulk: bool) -> AppResult<Value> {
    let name = request_component(definition)?;
    let mut content = Map::new();
    content.insert(
        definition.request_type.clone(),
        json!({ "schema": component_ref(name) }),
    );

    let mut obj = Map::new();
    if is_bulk {
        obj.insert("description".to_string(), json!("Bulk request"));
    }
    obj.insert("required".to_string(), json!(true));
    obj.insert("content".to_string(), Value::Object(content));
    Ok(Value::Object(obj))
}

/// Responses Object for `definition`.
///
/// The success entry references the response component, or the shared
/// message component for message-only endpoints.
pub fn responses(definition: &EndpointDefinition) -> AppResult<Value> {
    let success = if definition.response_obj.is_some() {
        response_component(definition)?
    } else {
        MESSAGE_RESPONSE
    };

    let mut responses = Map::new();
    responses.insert(
        "200".to_string(),
        json_response("Successful response", success),
    );
    responses.insert(
        "default".to_string(),
        json_response("Error response", ERROR_DETAILS_RESPONSE),
    );
    Ok(Value::Object(responses))
}

fn json_response(description: &str, component: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": component_ref(component) }
        }
    })
}

/// Parameter Object.
pub fn parameter(
    location: ParamLocation,
    name: &str,
    data_type: DataType,
    required: bool,
) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_string(), json!(name));
    obj.insert("in".to_string(), json!(location.as_str()));
    obj.insert("required".to_string(), json!(required));
    obj.insert("schema".to_string(), data_type.schema());
    Value::Object(obj)
}
