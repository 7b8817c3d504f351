//! HTTP request handlers.

pub mod family_member_handler;
pub mod memory_handler;
mod payload;
pub mod upload_handler;

pub use family_member_handler::family_member_routes;
pub use memory_handler::memory_routes;
pub use upload_handler::sign_s3;
