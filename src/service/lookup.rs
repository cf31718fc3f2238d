//! The lookup seam used to late-bind handlers and middleware.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Capability, Error};
use crate::service::capability::{Handler, Middleware};

/// A service returned by a [`Lookup`].
///
/// Handlers and middleware are tagged explicitly so callers can check the
/// capability they need without downcasting. Anything else is a plain value.
#[derive(Clone)]
pub enum Service {
    /// A request handler.
    Handler(Arc<dyn Handler>),
    /// A middleware.
    Middleware(Arc<dyn Middleware>),
    /// Any other registered object.
    Value(Arc<dyn Any + Send + Sync>),
}

impl Service {
    /// The capability this service provides, if any.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Service::Handler(_) => Some(Capability::Handler),
            Service::Middleware(_) => Some(Capability::Middleware),
            Service::Value(_) => None,
        }
    }

    /// Returns the handler, if this service is one.
    pub fn into_handler(self) -> Option<Arc<dyn Handler>> {
        match self {
            Service::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// Returns the middleware, if this service is one.
    pub fn into_middleware(self) -> Option<Arc<dyn Middleware>> {
        match self {
            Service::Middleware(middleware) => Some(middleware),
            _ => None,
        }
    }

    /// Downcast a plain value to a concrete type.
    pub fn downcast_value<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Service::Value(value) => value.clone().downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Handler(_) => f.write_str("Service::Handler(..)"),
            Service::Middleware(_) => f.write_str("Service::Middleware(..)"),
            Service::Value(_) => f.write_str("Service::Value(..)"),
        }
    }
}

/// A registry that maps string keys to services.
///
/// Implementations fail with [`Error::NotFound`] for unknown keys and with
/// [`Error::Lookup`] when producing the service fails.
pub trait Lookup {
    /// Look up the service registered under `key`.
    fn get(&self, key: &str) -> Result<Service, Error>;

    /// Whether a service is registered under `key`.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn get(&self, key: &str) -> Result<Service, Error> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn get(&self, key: &str) -> Result<Service, Error> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

impl<L: Lookup + ?Sized> Lookup for Box<L> {
    fn get(&self, key: &str) -> Result<Service, Error> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

impl Lookup for HashMap<String, Service> {
    fn get(&self, key: &str) -> Result<Service, Error> {
        HashMap::get(self, key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}
