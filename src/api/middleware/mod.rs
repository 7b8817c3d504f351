//! API middleware.

mod error_handler;
mod security_headers;

pub use error_handler::{error_handler, handle_panic};
pub use security_headers::security_headers;
