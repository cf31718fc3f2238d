//! Request and response values exchanged with handlers and middleware.
//!
//! These types carry no wire format; they exist so the handler and middleware
//! capabilities have something concrete to process.

mod request;
mod response;

// Re-export public items
pub use request::HttpRequest;
pub use response::{HttpResponse, StatusCode};
