//! Custom extractors.

mod json_body;
mod resolved;

pub use json_body::JsonBody;
pub use resolved::{Resolvable, Resolved};
