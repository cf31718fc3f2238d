//! A single routable endpoint for HTTP routers.
//!
//! This library models one route inside a router: an HTTP method and a normalized
//! path bound to a handler, an ordered middleware sequence and route parameters.
//!
//! # Features
//!
//! - Path normalization from one or more segments
//! - Copy-on-write route variants (`with_path`, `with_param`)
//! - Handlers and middleware given either directly or by key, bound later through a
//!   [`Lookup`] service
//! - An in-memory [`Container`] implementing [`Lookup`]
//! - Typed errors for missing services and capability mismatches
//!
//! # Examples
//!
//! ## Late-bound handlers
//!
//! ```
//! use microhttp_route::{Container, Error, HttpRequest, HttpResponse, MiddlewareAware, Next, Route, StatusCode};
//!
//! let container = Container::new();
//! container
//!     .register_handler("home", |_req: HttpRequest| async {
//!         Ok::<_, Error>(HttpResponse::new(StatusCode::Ok).with_body_string("Hello, World!"))
//!     })
//!     .unwrap();
//! container
//!     .register_middleware("timing", |req: HttpRequest, next: Next| async move {
//!         let response = next(req).await?;
//!         Ok::<_, Error>(response.with_header("X-Timing", "0ms"))
//!     })
//!     .unwrap();
//!
//! let mut route = Route::new("GET", "/", "home")
//!     .named("home")
//!     .with_middlewares(["timing"]);
//! assert!(!route.is_resolved());
//!
//! route.resolve(&container).unwrap();
//! assert!(route.is_resolved());
//! assert_eq!(route.middlewares().len(), 1);
//! ```
//!
//! ## Error handling
//!
//! ```
//! use microhttp_route::{Container, Error, Route};
//!
//! let mut route = Route::new("GET", "/users", "users.index");
//!
//! match route.resolve(&Container::new()) {
//!     Ok(_) => println!("Route resolved"),
//!     Err(Error::NotFound(key)) => println!("Nothing registered for {}", key),
//!     Err(Error::TypeMismatch { expected, key }) => println!("{} is not a {}", key, expected),
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```

// Export the error module
pub mod error;

// Export the request/response module
pub mod http;

// Export the route module
pub mod route;

// Export the service module
pub mod service;

// Re-export commonly used items for convenience
pub use error::{Capability, Error};
pub use http::{HttpRequest, HttpResponse, StatusCode};
pub use route::{
    sanitize_path, HandlerRef, MiddlewareAware, MiddlewareRef, MiddlewareStack, Param, Params,
    Reference, Route,
};
pub use service::{
    handler_fn, middleware_fn, Container, ContainerConfig, Handler, HandlerFuture, Lookup,
    Middleware, Next, Service,
};
