//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod family_member;
pub mod memory;

pub use family_member::{FamilyMember, FamilyMemberChanges, NewFamilyMember};
pub use memory::{Memory, MemoryChanges, NewMemory};
