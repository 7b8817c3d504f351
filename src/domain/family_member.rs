//! Family member domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::xss::filter_xss;

/// Family member domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FamilyMember {
    /// Store-generated identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Peter")]
    pub first_name: String,
    #[schema(example = "Tardif")]
    pub last_name: String,
}

impl FamilyMember {
    /// Copy safe to send to a client, with free-text fields filtered.
    pub fn sanitized(&self) -> Self {
        Self {
            id: self.id,
            first_name: filter_xss(&self.first_name),
            last_name: filter_xss(&self.last_name),
        }
    }
}

/// Family member creation data, all required fields present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFamilyMember {
    pub first_name: String,
    pub last_name: String,
}

/// Partial update of a family member. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyMemberChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl FamilyMemberChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_filters_names_only() {
        let member = FamilyMember {
            id: 7,
            first_name: "<script>x</script>Ann".to_string(),
            last_name: "<strong>Lee</strong>".to_string(),
        };

        let safe = member.sanitized();
        assert_eq!(safe.id, 7);
        assert_eq!(safe.first_name, "&lt;script&gt;x&lt;/script&gt;Ann");
        assert_eq!(safe.last_name, "<strong>Lee</strong>");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(FamilyMemberChanges::default().is_empty());
        let changes = FamilyMemberChanges {
            last_name: Some("Smith".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
