//! Path and operation assembly for one definition.

use crate::definition::{EndpointDefinition, ParamLocation, ParamSpec};
use crate::error::AppResult;
use crate::oas::document::SpecificationDocument;
use crate::oas::shapes;
use serde_json::{json, Map, Value};
use tracing::debug;

fn push_parameters(target: &mut Vec<Value>, params: &[ParamSpec], location: ParamLocation) {
    for param in params {
        target.push(shapes::parameter(
            location,
            &param.name,
            param.effective_type(),
            param.is_required(),
        ));
    }
}

/// Query parameters followed by path parameters.
///
/// Returns `None` when the definition declares no parameters at all.
pub fn build_parameters(definition: &EndpointDefinition) -> Option<Vec<Value>> {
    let mut parameters = Vec::new();
    push_parameters(&mut parameters, &definition.query_params, ParamLocation::Query);
    push_parameters(&mut parameters, &definition.path_params, ParamLocation::Path);

    if parameters.is_empty() {
        None
    } else {
        Some(parameters)
    }
}

/// Resolves the request media type from the role, then builds the request body.
///
/// The media type is recorded on the definition even when there is no body.
pub fn build_request_body(definition: &mut EndpointDefinition) -> AppResult<Option<Value>> {
    let shape = definition.rr_type.request();
    if shape.is_raw() {
        definition.request_type = shape.media_type().to_string();
    }

    if definition.request_body.is_none() {
        return Ok(None);
    }
    let is_bulk = definition.rr_type.is_bulk();
    shapes::request_body(definition, is_bulk).map(Some)
}

/// Builds the responses, for endpoints with a response payload or a bare message.
pub fn build_responses(definition: &EndpointDefinition) -> AppResult<Option<Value>> {
    if definition.response_obj.is_none() && !definition.only_message {
        return Ok(None);
    }
    shapes::responses(definition).map(Some)
}

/// One operation per HTTP method, keyed by the lower-case verb.
///
/// An operation without body, responses or tags is still emitted as `{}`.
pub fn build_operations(definition: &mut EndpointDefinition) -> AppResult<Map<String, Value>> {
    let request_body = build_request_body(definition)?;
    let responses = build_responses(definition)?;

    let mut operations = Map::new();
    for method in &definition.methods {
        let mut op = Map::new();
        if let Some(body) = &request_body {
            op.insert("requestBody".to_string(), body.clone());
        }
        if let Some(responses) = &responses {
            op.insert("responses".to_string(), responses.clone());
        }
        if !definition.tags.is_empty() {
            op.insert("tags".to_string(), json!(definition.tags));
        }
        operations.insert(method.as_str().to_string(), Value::Object(op));
    }
    Ok(operations)
}

/// Builds the path entry of `definition` and submits it to the document.
pub fn assemble(
    document: &mut SpecificationDocument,
    definition: &mut EndpointDefinition,
) -> AppResult<()> {
    let parameters = build_parameters(definition);
    let operations = build_operations(definition)?;
    debug!(
        url = %definition.url,
        operations = operations.len(),
        "assembled path entry"
    );
    document.register_path(&definition.url, parameters, operations)
}
