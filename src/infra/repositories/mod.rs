//! Repository layer - Data access abstraction
//!
//! Each repository wraps one table behind the same five operations:
//! list-all, get-by-id, insert, delete-by-id and update-by-id.

pub(crate) mod entities;
mod family_member_repository;
mod memory_repository;

pub use family_member_repository::{FamilyMemberRepository, FamilyMemberStore};
pub use memory_repository::{MemoryRepository, MemoryStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use family_member_repository::MockFamilyMemberRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use memory_repository::MockMemoryRepository;
