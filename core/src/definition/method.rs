//! HTTP verbs accepted on an endpoint definition.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

/// An HTTP method that maps onto a fixed Path Item field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// Lower-case key used inside a Path Item.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "put" => Ok(HttpMethod::Put),
            "post" => Ok(HttpMethod::Post),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "patch" => Ok(HttpMethod::Patch),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(AppError::InvalidDefinition(format!(
                "Unsupported HTTP method '{}'",
                s
            ))),
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inserts `method` unless already present, keeping first-seen order.
pub(crate) fn push_unique(methods: &mut Vec<HttpMethod>, method: HttpMethod) {
    if !methods.contains(&method) {
        methods.push(method);
    }
}

/// Deserializes a method list as an ordered set.
pub(crate) fn deserialize_methods<'de, D>(deserializer: D) -> Result<Vec<HttpMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<HttpMethod>>::deserialize(deserializer)?.unwrap_or_default();
    let mut methods = Vec::with_capacity(raw.len());
    for method in raw {
        push_unique(&mut methods, method);
    }
    Ok(methods)
}
