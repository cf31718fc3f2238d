//! The route entity and its resolution protocol.

use std::sync::Arc;

use log::{debug, trace, warn};
use serde_json::Value;

use crate::error::{Capability, Error};
use crate::route::middleware::{MiddlewareAware, MiddlewareStack};
use crate::route::param::{Param, Params};
use crate::route::path::sanitize_path;
use crate::route::reference::{HandlerRef, MiddlewareRef, Reference};
use crate::service::Lookup;

/// A method and path bound to a handler, middleware and route parameters.
///
/// Routes are values: [`with_path`](Route::with_path) and
/// [`with_param`](Route::with_param) return modified copies and leave the receiver
/// untouched. [`resolve`](Route::resolve) is the only operation that changes a route
/// in place, and is meant to run once, before the route is shared with request
/// handling code.
///
/// ```
/// use microhttp_route::{Container, Error, HttpRequest, HttpResponse, Param, Route, StatusCode};
///
/// let container = Container::new();
/// container
///     .register_handler("users.show", |_req: HttpRequest| async {
///         Ok::<_, Error>(HttpResponse::new(StatusCode::Ok))
///     })
///     .unwrap();
///
/// let group = Route::from_segments("GET", ["api", "v1"], "users.show");
/// let mut route = group.with_path(["api", "v1", "users"]).with_param(Param::new("page", 1));
/// route.resolve(&container).unwrap();
///
/// assert_eq!(group.path(), "/api/v1");
/// assert_eq!(route.path(), "/api/v1/users");
/// assert!(route.is_resolved());
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    method: String,
    path: String,
    handler: HandlerRef,
    name: Option<String>,
    middlewares: MiddlewareStack,
    parameters: Params,
}

impl Route {
    /// Create a route for a single path string.
    pub fn new(
        method: impl Into<String>,
        path: impl AsRef<str>,
        handler: impl Into<HandlerRef>,
    ) -> Self {
        Self::from_segments(method, [path], handler)
    }

    /// Create a route whose path is joined from `segments`.
    pub fn from_segments<I, S>(
        method: impl Into<String>,
        segments: I,
        handler: impl Into<HandlerRef>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let route = Self {
            method: method.into(),
            path: sanitize_path(segments),
            handler: handler.into(),
            name: None,
            middlewares: MiddlewareStack::new(),
            parameters: Params::new(),
        };
        trace!("Created route {} {}", route.method, route.path);
        route
    }

    /// Set the route name used for URL generation.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial middleware sequence.
    pub fn with_middlewares<I>(mut self, middlewares: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MiddlewareRef>,
    {
        self.set_middlewares(middlewares);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn params(&self) -> &Params {
        &self.parameters
    }

    /// Get a single route parameter.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    /// Whether the handler and every middleware are concrete instances.
    pub fn is_resolved(&self) -> bool {
        self.handler.is_resolved() && self.middlewares.iter().all(Reference::is_resolved)
    }

    /// A copy of this route with its path rebuilt from `segments`.
    pub fn with_path<I, S>(&self, segments: I) -> Route
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut route = self.clone();
        route.path = sanitize_path(segments);
        route
    }

    /// A copy of this route with `param` set.
    pub fn with_param(&self, param: Param) -> Route {
        self.with_params([param])
    }

    /// A copy of this route with each of `params` set in order. Later values win.
    pub fn with_params<I>(&self, params: I) -> Route
    where
        I: IntoIterator<Item = Param>,
    {
        let mut route = self.clone();
        for param in params {
            route.parameters.insert(param);
        }
        route
    }

    /// Replace keyed handler and middleware references with the services `lookup`
    /// returns for them.
    ///
    /// Already-resolved entries are left alone, so resolving twice performs no
    /// lookups the second time. On failure the handler keeps its key and the
    /// middleware sequence is left as it was; the route should be discarded.
    pub fn resolve<L>(&mut self, lookup: &L) -> Result<&mut Self, Error>
    where
        L: Lookup + ?Sized,
    {
        let result = self
            .resolve_handler(lookup)
            .and_then(|()| self.resolve_middlewares(lookup));

        if let Err(err) = result {
            warn!("Failed to resolve route {} {}: {err}", self.method, self.path);
            return Err(err);
        }

        debug!("Resolved route {} {}", self.method, self.path);
        Ok(self)
    }

    fn resolve_handler<L>(&mut self, lookup: &L) -> Result<(), Error>
    where
        L: Lookup + ?Sized,
    {
        let Reference::Key(key) = &self.handler else {
            return Ok(());
        };

        let handler = lookup
            .get(key)?
            .into_handler()
            .ok_or_else(|| Error::TypeMismatch {
                expected: Capability::Handler,
                key: key.clone(),
            })?;

        debug!("Resolved handler {key} for {} {}", self.method, self.path);
        self.handler = Reference::Instance(handler);
        Ok(())
    }

    fn resolve_middlewares<L>(&mut self, lookup: &L) -> Result<(), Error>
    where
        L: Lookup + ?Sized,
    {
        if self.middlewares.iter().all(Reference::is_resolved) {
            return Ok(());
        }

        let resolved = self
            .middlewares
            .iter()
            .map(|entry| -> Result<MiddlewareRef, Error> {
                let key = match entry {
                    Reference::Instance(middleware) => {
                        return Ok(Reference::Instance(Arc::clone(middleware)))
                    }
                    Reference::Key(key) => key,
                };
                let middleware = lookup
                    .get(key)?
                    .into_middleware()
                    .ok_or_else(|| Error::TypeMismatch {
                        expected: Capability::Middleware,
                        key: key.clone(),
                    })?;
                debug!("Resolved middleware {key} for {} {}", self.method, self.path);
                Ok(Reference::Instance(middleware))
            })
            .collect::<Result<Vec<MiddlewareRef>, Error>>()?;

        self.middlewares.set_all(resolved);
        Ok(())
    }
}

impl MiddlewareAware for Route {
    fn middleware_stack(&self) -> &MiddlewareStack {
        &self.middlewares
    }

    fn middleware_stack_mut(&mut self) -> &mut MiddlewareStack {
        &mut self.middlewares
    }
}
