//! Error types for route resolution and service lookup.

use std::fmt;

use thiserror::Error;

/// The capability a looked-up service was expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Processes a request and produces a response.
    Handler,
    /// Intercepts a request and forwards it along the chain.
    Middleware,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Handler => write!(f, "handler"),
            Capability::Middleware => write!(f, "middleware"),
        }
    }
}

/// Errors that can occur while looking up services or resolving routes.
#[derive(Debug, Error)]
pub enum Error {
    /// No service is registered under the key.
    #[error("Service not found: {0}")]
    NotFound(String),

    /// The lookup service failed internally while producing the service.
    #[error("Lookup of {key} failed: {reason}")]
    Lookup {
        /// The key being looked up.
        key: String,
        /// What went wrong.
        reason: String,
    },

    /// The lookup succeeded but the service lacks the required capability.
    #[error("Service {key} is not a {expected}")]
    TypeMismatch {
        /// The capability the call site needed.
        expected: Capability,
        /// The key that was looked up.
        key: String,
    },

    /// A key was registered twice while overrides are disabled.
    #[error("Service already registered: {0}")]
    AlreadyRegistered(String),

    /// A handler or middleware failed while processing a request.
    #[error("Handler error: {0}")]
    Handler(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::NotFound(key) | Error::AlreadyRegistered(key) => Some(key),
            Error::Lookup { key, .. } | Error::TypeMismatch { key, .. } => Some(key),
            Error::Handler(_) | Error::Json(_) => None,
        }
    }
}
