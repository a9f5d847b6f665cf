#![deny(missing_docs)]

//! # Component Naming
//!
//! Every processed definition gets its own request and response component
//! names. The default namer draws a random 13-character code per definition,
//! so identical payload shapes on different endpoints still get independent
//! components. [`ContentHashNamer`] instead derives the code from the shape
//! itself, so identical shapes share one component.

use crate::definition::{EndpointDefinition, Payload};
use crate::error::{AppError, AppResult};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

/// Length of the generated component code.
pub const COMPONENT_CODE_LEN: usize = 13;

/// Prefix of request component names.
pub const REQUEST_PREFIX: &str = "Req";
/// Prefix of response component names.
pub const RESPONSE_PREFIX: &str = "Res";

/// Request and response component names for one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentNames {
    /// Name of the request component.
    pub request: String,
    /// Name of the response component.
    pub response: String,
}

/// Produces component names for definitions.
pub trait ComponentNamer {
    /// Names the components of `definition`.
    fn name(&mut self, definition: &EndpointDefinition) -> AppResult<ComponentNames>;
}

/// Returns `len` random ASCII alphanumerics, uppercased.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Names components `Req<CODE>` / `Res<CODE>` with one random code per definition.
#[derive(Debug)]
pub struct RandomCodeNamer {
    rng: StdRng,
}

impl RandomCodeNamer {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCodeNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentNamer for RandomCodeNamer {
    fn name(&mut self, _definition: &EndpointDefinition) -> AppResult<ComponentNames> {
        let code = random_code(&mut self.rng, COMPONENT_CODE_LEN);
        Ok(ComponentNames {
            request: format!("{}{}", REQUEST_PREFIX, code),
            response: format!("{}{}", RESPONSE_PREFIX, code),
        })
    }
}

/// Derives names from a BLAKE3 hash of the canonical JSON of each shape.
///
/// The request code covers the request shape and payload, the response code
/// covers the response shape and payload, so two endpoints with the same
/// payload and role share components.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentHashNamer;

impl ContentHashNamer {
    fn code(kind: &str, payload: Option<&Payload>) -> AppResult<String> {
        let payload = payload.map(Payload::schema).unwrap_or(&Value::Null);
        let canonical = json_canon::to_string(payload).map_err(|e| {
            AppError::Serialization(format!("Failed to canonicalize payload schema: {}", e))
        })?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(kind.as_bytes());
        hasher.update(&[0]);
        hasher.update(canonical.as_bytes());
        let hex = hasher.finalize().to_hex();
        Ok(hex.as_str()[..COMPONENT_CODE_LEN].to_ascii_uppercase())
    }
}

impl ComponentNamer for ContentHashNamer {
    fn name(&mut self, definition: &EndpointDefinition) -> AppResult<ComponentNames> {
        let role = &definition.rr_type;
        let request = Self::code(role.request().as_str(), definition.request_body.as_ref())?;
        let response = Self::code(role.response().as_str(), definition.response_obj.as_ref())?;
        Ok(ComponentNames {
            request: format!("{}{}", REQUEST_PREFIX, request),
            response: format!("{}{}", RESPONSE_PREFIX, response),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_code(s: &str) -> bool {
        s.len() == COMPONENT_CODE_LEN
            && s.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    #[test]
    fn test_random_code_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = random_code(&mut rng, COMPONENT_CODE_LEN);
        assert!(is_code(&code), "{code}");
    }

    #[test]
    fn test_random_names_share_code_and_differ_per_definition() {
        let mut namer = RandomCodeNamer::new();
        let def = EndpointDefinition::new("/x");

        let first = namer.name(&def).unwrap();
        let second = namer.name(&def).unwrap();

        assert!(first.request.starts_with(REQUEST_PREFIX));
        assert!(first.response.starts_with(RESPONSE_PREFIX));
        assert!(is_code(&first.request[3..]));
        assert_eq!(first.request[3..], first.response[3..]);
        assert_ne!(first.request, second.request);
        assert_ne!(first.response, second.response);
    }

    #[test]
    fn test_seeded_namer_is_reproducible() {
        let def = EndpointDefinition::new("/x");
        let a = RandomCodeNamer::seeded(42).name(&def).unwrap();
        let b = RandomCodeNamer::seeded(42).name(&def).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_hash_is_structural() {
        let mut namer = ContentHashNamer;
        let a = EndpointDefinition::new("/a")
            .with_request_body(json!({ "type": "object", "required": ["id"] }))
            .with_response(json!({ "type": "string" }));
        let b = EndpointDefinition::new("/b")
            .with_request_body(json!({ "required": ["id"], "type": "object" }))
            .with_response(json!({ "type": "string" }));

        let na = namer.name(&a).unwrap();
        let nb = namer.name(&b).unwrap();
        assert_eq!(na, nb);
        assert!(is_code(&na.request[3..]));
    }

    #[test]
    fn test_content_hash_depends_on_shape() {
        let mut namer = ContentHashNamer;
        let payload = json!({ "type": "object" });
        let single = EndpointDefinition::new("/a").with_request_body(payload.clone());
        let bulk = EndpointDefinition::new("/a")
            .with_role("BULK_CREATE")
            .with_request_body(payload);

        assert_ne!(
            namer.name(&single).unwrap().request,
            namer.name(&bulk).unwrap().request
        );
    }
}
