//! A single routable endpoint.
//!
//! A [`Route`] binds a method and a normalized path to a handler, an ordered
//! middleware sequence and a set of route parameters. Handlers and middleware may be
//! given by key and bound later with [`Route::resolve`].

mod middleware;
mod param;
mod path;
mod reference;
mod entity;

// Re-export public items
pub use middleware::{MiddlewareAware, MiddlewareStack};
pub use param::{Param, Params};
pub use path::sanitize_path;
pub use reference::{HandlerRef, MiddlewareRef, Reference};
pub use entity::Route;
