pub mod constants;
mod errors;
pub mod health_check; // Public for OpenAPI annotations
mod not_found;
pub mod waitlist; // Public for OpenAPI annotations

pub use errors::{ApiError, ErrorBody, panic_response};
pub use health_check::*;
pub use not_found::*;
pub use waitlist::*;
