//! Handler and middleware capabilities, and the lookup services that produce them.
//!
//! A route may refer to its handler and middleware by key. The [`Lookup`] trait is
//! the seam through which those keys are turned into [`Service`] values, and
//! [`Container`] is an in-memory implementation of it.

mod capability;
mod container;
mod lookup;
mod tests;

// Re-export public items
pub use capability::{handler_fn, middleware_fn, Handler, HandlerFuture, Middleware, Next};
pub use container::{Container, ContainerConfig};
pub use lookup::{Lookup, Service};
