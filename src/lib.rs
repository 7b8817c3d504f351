//! Family Vault - REST backend for family members and their memories
//!
//! Two resource collections stored in Postgres, with markup filtering on
//! every free-text field sent back to clients, plus a helper that issues
//! pre-signed S3 upload URLs.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Family member and memory entities
//! - **infra**: Database, migrations, accessors and upload signing
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **utils**: Markup filtering
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{FamilyMember, Memory};
pub use errors::{AppError, AppResult};
