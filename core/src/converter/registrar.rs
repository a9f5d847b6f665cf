//! Component naming and schema registration for one definition.

use crate::definition::EndpointDefinition;
use crate::error::{AppError, AppResult};
use crate::naming::ComponentNamer;
use crate::oas::document::{Registration, SpecificationDocument};
use crate::oas::shapes;
use crate::role::{RequestShape, ResponseShape};
use serde_json::Value;
use tracing::debug;

/// Assigns the request and response component names.
pub fn pre_process(
    definition: &mut EndpointDefinition,
    namer: &mut impl ComponentNamer,
) -> AppResult<()> {
    let names = namer.name(definition)?;
    debug!(
        url = %definition.url,
        request = %names.request,
        response = %names.response,
        "assigned component names"
    );
    definition.request_component = Some(names.request);
    definition.response_component = Some(names.response);
    Ok(())
}

/// Request component schema for the role's request shape.
pub fn request_schema(shape: RequestShape, payload: &Value) -> Value {
    match shape {
        RequestShape::BinaryUpload | RequestShape::Form => payload.clone(),
        RequestShape::Bulk => shapes::bulk_request(payload),
        RequestShape::Single => shapes::single_request(payload),
    }
}

/// Response component schema for the role's response shape.
pub fn response_schema(shape: ResponseShape, payload: &Value) -> Value {
    match shape {
        ResponseShape::Paginated => shapes::paginated_response(payload),
        ResponseShape::List => shapes::bulk_success_response(payload),
        ResponseShape::Data => shapes::data_response(payload),
    }
}

fn assigned<'a>(name: &'a Option<String>, url: &str) -> AppResult<&'a str> {
    name.as_deref().ok_or_else(|| {
        AppError::General(format!(
            "Definition '{}' must be pre-processed before its schemas are registered",
            url
        ))
    })
}

/// Registers the request and response components of `definition`.
///
/// Only present payloads are registered. Existing names are left untouched.
pub fn register_schemas(
    document: &mut SpecificationDocument,
    definition: &EndpointDefinition,
) -> AppResult<()> {
    let role = &definition.rr_type;

    if let Some(payload) = &definition.request_body {
        let name = assigned(&definition.request_component, &definition.url)?;
        let schema = request_schema(role.request(), payload.schema());
        log_registration(name, document.register_component(name, schema));
    }

    if let Some(payload) = &definition.response_obj {
        let name = assigned(&definition.response_component, &definition.url)?;
        let schema = response_schema(role.response(), payload.schema());
        log_registration(name, document.register_component(name, schema));
    }

    Ok(())
}

fn log_registration(name: &str, outcome: Registration) {
    if outcome != Registration::Inserted {
        debug!(component = name, ?outcome, "component not re-registered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::RandomCodeNamer;
    use crate::oas::document::ApiInfo;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc() -> SpecificationDocument {
        SpecificationDocument::new(ApiInfo::new("Test API", "1.0.0")).unwrap()
    }

    fn item() -> Value {
        json!({ "type": "object", "properties": { "name": { "type": "string" } } })
    }

    fn prepared(def: EndpointDefinition) -> EndpointDefinition {
        let mut def = def;
        pre_process(&mut def, &mut RandomCodeNamer::seeded(1)).unwrap();
        def
    }

    #[test]
    fn test_pre_process_assigns_names() {
        let def = prepared(EndpointDefinition::new("/x"));
        let req = def.request_component.unwrap();
        let res = def.response_component.unwrap();
        assert!(req.starts_with("Req"));
        assert!(res.starts_with("Res"));
        assert_eq!(req.len(), 16);
        assert_eq!(res.len(), 16);
    }

    #[test]
    fn test_bulk_request_is_wrapped() {
        let mut doc = doc();
        let def = prepared(
            EndpointDefinition::new("/widgets")
                .with_role("BULK_CREATE")
                .with_request_body(item()),
        );
        register_schemas(&mut doc, &def).unwrap();

        let name = def.request_component.as_deref().unwrap();
        assert_eq!(doc.component(name), Some(&shapes::bulk_request(&item())));
        assert!(!doc.has_component(def.response_component.as_deref().unwrap()));
    }

    #[test]
    fn test_binary_and_form_requests_are_raw() {
        for tag in ["BINARY_UPLOAD", "POST_FORM", "BINARY_UPLOAD_LIST"] {
            let mut doc = doc();
            let def = prepared(
                EndpointDefinition::new("/upload")
                    .with_role(tag)
                    .with_request_body(item()),
            );
            register_schemas(&mut doc, &def).unwrap();
            let name = def.request_component.as_deref().unwrap();
            assert_eq!(doc.component(name), Some(&item()), "{tag}");
        }
    }

    #[test]
    fn test_response_shapes() {
        let cases = vec![
            ("PAGINATED_LIST", shapes::paginated_response(&item())),
            ("DETAILS_LIST", shapes::bulk_success_response(&item())),
            ("DETAILS", shapes::data_response(&item())),
        ];

        for (tag, expected) in cases {
            let mut doc = doc();
            let def = prepared(
                EndpointDefinition::new("/widgets")
                    .with_role(tag)
                    .with_response(item()),
            );
            register_schemas(&mut doc, &def).unwrap();
            let name = def.response_component.as_deref().unwrap();
            assert_eq!(doc.component(name), Some(&expected), "{tag}");
        }
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut doc = doc();
        let def = prepared(EndpointDefinition::new("/widgets").with_response(item()));
        register_schemas(&mut doc, &def).unwrap();

        let mut reused = def.clone();
        reused.response_obj = Some(json!({ "type": "integer" }).into());
        register_schemas(&mut doc, &reused).unwrap();

        let name = def.response_component.as_deref().unwrap();
        assert_eq!(doc.component(name), Some(&shapes::data_response(&item())));
        assert_eq!(doc.components().len(), 1);
    }

    #[test]
    fn test_register_requires_pre_processing() {
        let mut doc = doc();
        let def = EndpointDefinition::new("/widgets").with_request_body(item());
        assert!(matches!(
            register_schemas(&mut doc, &def),
            Err(AppError::General(_))
        ));
    }
}
