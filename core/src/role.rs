#![deny(missing_docs)]

//! # Role Classification
//!
//! An endpoint carries a role tag such as `BULK_CREATE` or `PAGINATED_LIST`
//! describing the shape family of its request and response payloads.
//!
//! The raw predicates are kept as free functions; the tag is classified once
//! into a [`RoleTag`] whose request and response shapes are closed enums with
//! an explicit precedence order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

/// Media type used for JSON payloads.
pub const APPLICATION_JSON: &str = "application/json";
/// Media type used for binary uploads.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
/// Media type used for classic HTML form posts.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

const BULK_PREFIX: &str = "BULK";
const BINARY_UPLOAD_PREFIX: &str = "BINARY_UPLOAD";
const FORM_PREFIX: &str = "POST_FORM";
const LIST_SUFFIX: &str = "LIST";
const PAGINATED_PREFIX: &str = "PAGINATED";

/// True if the tag describes a bulk (array of items) request.
pub fn is_bulk(tag: &str) -> bool {
    tag.starts_with(BULK_PREFIX)
}

/// True if the tag describes a multipart binary upload.
pub fn is_binary_upload(tag: &str) -> bool {
    tag.starts_with(BINARY_UPLOAD_PREFIX)
}

/// True if the tag describes a url-encoded form post.
pub fn is_form(tag: &str) -> bool {
    tag.starts_with(FORM_PREFIX)
}

/// True if the tag describes a list response.
pub fn is_list_response(tag: &str) -> bool {
    tag.ends_with(LIST_SUFFIX)
}

/// True if the tag describes a paginated response.
pub fn is_paginated(tag: &str) -> bool {
    tag.starts_with(PAGINATED_PREFIX)
}

/// Shape family of a request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestShape {
    /// One item wrapped in the single envelope.
    #[default]
    Single,
    /// Many items wrapped in the bulk envelope.
    Bulk,
    /// A multipart upload; the payload is used as-is.
    BinaryUpload,
    /// A url-encoded form; the payload is used as-is.
    Form,
}

impl RequestShape {
    /// Classifies a raw tag.
    ///
    /// Precedence is BinaryUpload, then Form, then Bulk, then Single.
    pub fn classify(tag: &str) -> Self {
        if is_binary_upload(tag) {
            RequestShape::BinaryUpload
        } else if is_form(tag) {
            RequestShape::Form
        } else if is_bulk(tag) {
            RequestShape::Bulk
        } else {
            RequestShape::Single
        }
    }

    /// Media type the request body is declared with.
    pub fn media_type(&self) -> &'static str {
        match self {
            RequestShape::BinaryUpload => MULTIPART_FORM_DATA,
            RequestShape::Form => FORM_URLENCODED,
            RequestShape::Single | RequestShape::Bulk => APPLICATION_JSON,
        }
    }

    /// True if the payload is registered without an envelope.
    pub fn is_raw(&self) -> bool {
        matches!(self, RequestShape::BinaryUpload | RequestShape::Form)
    }

    /// Stable lower-case name, used for content hashing and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestShape::Single => "single",
            RequestShape::Bulk => "bulk",
            RequestShape::BinaryUpload => "binary_upload",
            RequestShape::Form => "form",
        }
    }
}

/// Shape family of a response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseShape {
    /// One item in the data envelope.
    #[default]
    Data,
    /// A list of items in the bulk-success envelope.
    List,
    /// A page of items plus pagination metadata.
    Paginated,
}

impl ResponseShape {
    /// Classifies a raw tag.
    ///
    /// A paginated tag is never a plain list, even when it ends in `LIST`.
    pub fn classify(tag: &str) -> Self {
        if is_paginated(tag) {
            ResponseShape::Paginated
        } else if is_list_response(tag) {
            ResponseShape::List
        } else {
            ResponseShape::Data
        }
    }

    /// Stable lower-case name, used for content hashing and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseShape::Data => "data",
            ResponseShape::List => "list",
            ResponseShape::Paginated => "paginated",
        }
    }
}

/// A role tag classified into request and response shapes.
///
/// Built once from the raw tag; the raw string is kept for diagnostics and
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleTag {
    raw: String,
    request: RequestShape,
    response: ResponseShape,
}

impl RoleTag {
    /// Classifies a raw tag. Unrecognized tags fall back to Single/Data.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let request = RequestShape::classify(&raw);
        let response = ResponseShape::classify(&raw);
        Self {
            raw,
            request,
            response,
        }
    }

    /// The raw tag as written in the definition.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Request shape family.
    pub fn request(&self) -> RequestShape {
        self.request
    }

    /// Response shape family.
    pub fn response(&self) -> ResponseShape {
        self.response
    }

    /// True for bulk requests.
    pub fn is_bulk(&self) -> bool {
        self.request == RequestShape::Bulk
    }
}

impl FromStr for RoleTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RoleTag::new(s))
    }
}

impl From<&str> for RoleTag {
    fn from(value: &str) -> Self {
        RoleTag::new(value)
    }
}

impl Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for RoleTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RoleTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(RoleTag::new(raw.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(is_bulk("BULK_CREATE"));
        assert!(!is_bulk("CREATE_BULK"));
        assert!(is_binary_upload("BINARY_UPLOAD_AVATAR"));
        assert!(is_form("POST_FORM_LOGIN"));
        assert!(is_list_response("DETAILS_LIST"));
        assert!(!is_list_response("LIST_DETAILS"));
        assert!(is_paginated("PAGINATED_LIST"));
    }

    #[test]
    fn test_paginated_wins_over_list() {
        let role = RoleTag::new("PAGINATED_LIST");
        assert!(is_list_response(role.raw()));
        assert_eq!(role.response(), ResponseShape::Paginated);
    }

    #[test]
    fn test_bulk_list_combines_request_and_response() {
        let role = RoleTag::new("BULK_UPDATE_LIST");
        assert_eq!(role.request(), RequestShape::Bulk);
        assert_eq!(role.response(), ResponseShape::List);
        assert!(role.is_bulk());
    }

    #[test]
    fn test_media_types() {
        assert_eq!(
            RoleTag::new("BINARY_UPLOAD").request().media_type(),
            MULTIPART_FORM_DATA
        );
        assert_eq!(
            RoleTag::new("POST_FORM").request().media_type(),
            FORM_URLENCODED
        );
        assert_eq!(
            RoleTag::new("BULK_CREATE").request().media_type(),
            APPLICATION_JSON
        );
    }

    #[test]
    fn test_binary_upload_is_raw_even_when_listing() {
        let role = RoleTag::new("BINARY_UPLOAD_LIST");
        assert_eq!(role.request(), RequestShape::BinaryUpload);
        assert!(role.request().is_raw());
        assert_eq!(role.response(), ResponseShape::List);
    }

    #[test]
    fn test_unknown_and_empty_tags_fall_back() {
        for tag in ["", "DETAILS", "bulk_lowercase"] {
            let role = RoleTag::new(tag);
            assert_eq!(role.request(), RequestShape::Single, "{tag}");
            assert_eq!(role.response(), ResponseShape::Data, "{tag}");
        }
    }

    #[test]
    fn test_serde_uses_raw_tag() {
        let role: RoleTag = serde_json::from_str("\"BULK_CREATE\"").unwrap();
        assert_eq!(role.request(), RequestShape::Bulk);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"BULK_CREATE\"");
    }

    #[test]
    fn test_null_tag_is_untagged() {
        let role: RoleTag = serde_json::from_str("null").unwrap();
        assert_eq!(role.raw(), "");
        assert_eq!(role.request(), RequestShape::Single);
        assert_eq!(role.response(), ResponseShape::Data);
    }
}
