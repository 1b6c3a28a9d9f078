//! Request descriptors: one value per API call.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// HTTP method of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// List, detail and query calls.
    #[default]
    Get,
    /// Create, update and action calls.
    Post,
}

impl Method {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the response body should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Structured JSON, normally an [`Envelope`](crate::Envelope).
    #[default]
    Json,
    /// Raw bytes (file and ticket downloads); envelope handling is skipped.
    Blob,
}

/// Describes a single API call relative to the configured base URL.
///
/// ```
/// use railbook_core::{Method, RequestDescriptor};
///
/// let req = RequestDescriptor::get("/passengers/list").query("userId", 7);
/// assert_eq!(req.method, Method::Get);
/// assert_eq!(req.query, vec![("userId".to_owned(), "7".to_owned())]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RequestDescriptor {
    /// Path below the base URL, starting with `/`.
    pub path: String,
    /// Raw values appended to `path` as individually escaped segments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
    /// HTTP method.
    pub method: Method,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON request body.
    pub body: Option<Value>,
    /// Expected response kind.
    pub response_kind: ResponseKind,
}

impl RequestDescriptor {
    /// Creates a descriptor with no parameters, no body and a JSON response.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            segments: Vec::new(),
            method,
            query: Vec::new(),
            body: None,
            response_kind: ResponseKind::Json,
        }
    }

    /// Shorthand for `new(Method::Get, path)`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for `new(Method::Post, path)`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Appends `value` to the path as one segment. The transport escapes it,
    /// so `/` and spaces inside `value` stay part of the segment.
    #[must_use]
    pub fn segment(mut self, value: impl fmt::Display) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Sets a raw JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns the serializer error if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// Marks the response as a raw binary download.
    #[must_use]
    pub fn blob(mut self) -> Self {
        self.response_kind = ResponseKind::Blob;
        self
    }

    /// Returns `true` if the response should be handed back untouched.
    #[must_use]
    pub fn is_blob(&self) -> bool {
        self.response_kind == ResponseKind::Blob
    }

    /// Checks that the path is rooted.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPath`] if the path does not start with `/`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.path.starts_with('/') {
            return Err(CoreError::InvalidPath { path: self.path.clone() });
        }
        Ok(())
    }
}
