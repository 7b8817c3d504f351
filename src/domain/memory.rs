//! Memory domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::xss::filter_xss;

/// A recorded memory attached to a family member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Memory {
    /// Store-generated identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Dogs!")]
    pub memory_title: String,
    pub memory_date: DateTime<Utc>,
    /// May contain a restricted subset of markup
    #[schema(example = "Walking the dogs on the <strong>beach</strong>.")]
    pub memory_desc: String,
    #[schema(example = "https://www.memories.com")]
    pub media_url: String,
    /// Referenced family member, existence is not enforced
    #[schema(example = 1)]
    pub familymember_id: i32,
    /// Set by the store on insert and refreshed on update
    pub date_updated: DateTime<Utc>,
}

impl Memory {
    /// Copy safe to send to a client, with free-text fields filtered.
    pub fn sanitized(&self) -> Self {
        Self {
            memory_title: filter_xss(&self.memory_title),
            memory_desc: filter_xss(&self.memory_desc),
            ..self.clone()
        }
    }
}

/// Memory creation data, all required fields present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemory {
    pub memory_title: String,
    pub memory_date: DateTime<Utc>,
    pub memory_desc: String,
    pub media_url: String,
    pub familymember_id: i32,
}

/// Partial update of a memory. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryChanges {
    pub memory_title: Option<String>,
    pub memory_date: Option<DateTime<Utc>>,
    pub memory_desc: Option<String>,
    pub media_url: Option<String>,
    pub familymember_id: Option<i32>,
}

impl MemoryChanges {
    pub fn is_empty(&self) -> bool {
        self.memory_title.is_none()
            && self.memory_date.is_none()
            && self.memory_desc.is_none()
            && self.media_url.is_none()
            && self.familymember_id.is_none()
    }
}
