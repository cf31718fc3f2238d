//! Request representation handed to handlers.

use std::collections::HashMap;

/// A request as seen by a route's middleware and handler.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// The HTTP method, as given by the caller
    pub method: String,
    /// The request path
    pub path: String,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Parameters captured by the router while matching the path
    pub params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new request with no headers, body or parameters.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Add or replace a captured path parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Get a header value. Header names are matched case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v))
    }

    /// Get a captured path parameter.
    pub fn param(&self, name: &str) -> Option<&String> {
        self.params.get(name)
    }
}
