//! Deferred references to handlers and middleware.

use std::fmt;
use std::sync::Arc;

use crate::service::{Handler, Middleware};

/// Either a key to be looked up later, or the object itself.
pub enum Reference<T: ?Sized> {
    /// An opaque key into a lookup service.
    Key(String),
    /// A concrete instance.
    Instance(Arc<T>),
}

/// A handler given by key or by instance.
pub type HandlerRef = Reference<dyn Handler>;

/// A middleware given by key or by instance.
pub type MiddlewareRef = Reference<dyn Middleware>;

impl<T: ?Sized> Reference<T> {
    /// Whether this reference holds a concrete instance.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Instance(_))
    }

    /// The key, if this reference is still unresolved.
    pub fn key(&self) -> Option<&str> {
        match self {
            Reference::Key(key) => Some(key),
            Reference::Instance(_) => None,
        }
    }

    /// The instance, if this reference is resolved.
    pub fn instance(&self) -> Option<&Arc<T>> {
        match self {
            Reference::Key(_) => None,
            Reference::Instance(instance) => Some(instance),
        }
    }
}

impl<T: ?Sized> Clone for Reference<T> {
    fn clone(&self) -> Self {
        match self {
            Reference::Key(key) => Reference::Key(key.clone()),
            Reference::Instance(instance) => Reference::Instance(Arc::clone(instance)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Reference::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl<T: ?Sized> From<&str> for Reference<T> {
    fn from(key: &str) -> Self {
        Reference::Key(key.to_string())
    }
}

impl<T: ?Sized> From<String> for Reference<T> {
    fn from(key: String) -> Self {
        Reference::Key(key)
    }
}

impl<T: ?Sized> From<Arc<T>> for Reference<T> {
    fn from(instance: Arc<T>) -> Self {
        Reference::Instance(instance)
    }
}
