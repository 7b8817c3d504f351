//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories (one per table)
//! - Object storage upload signing

pub mod db;
pub mod repositories;
pub mod storage;

pub use db::{Database, MigrationStatus, Migrator};
pub use repositories::{FamilyMemberRepository, FamilyMemberStore, MemoryRepository, MemoryStore};
pub use storage::{S3Presigner, SignedUpload, UploadSigner};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockFamilyMemberRepository, MockMemoryRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockUploadSigner;
