//! The handler and middleware capability traits.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// The rest of the chain, as seen by a middleware.
pub type Next = Box<dyn FnOnce(HttpRequest) -> HandlerFuture + Send>;

/// Something that can process a request and produce a response.
pub trait Handler: Send + Sync {
    /// Handle the request.
    fn handle(&self, req: HttpRequest) -> HandlerFuture;
}

/// Something that can intercept a request and forward it along the chain.
pub trait Middleware: Send + Sync {
    /// Process the request, calling `next` to continue the chain or
    /// returning a response directly to short-circuit it.
    fn process(&self, req: HttpRequest, next: Next) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    fn handle(&self, req: HttpRequest) -> HandlerFuture {
        Box::pin(self(req))
    }
}

impl<F, Fut> Middleware for F
where
    F: Fn(HttpRequest, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    fn process(&self, req: HttpRequest, next: Next) -> HandlerFuture {
        Box::pin(self(req, next))
    }
}

/// Wrap an async function as a shared handler.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(f)
}

/// Wrap an async function as a shared middleware.
pub fn middleware_fn<F, Fut>(f: F) -> Arc<dyn Middleware>
where
    F: Fn(HttpRequest, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(f)
}
