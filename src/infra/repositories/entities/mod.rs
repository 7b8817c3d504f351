//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod family_member;
pub mod memory;
