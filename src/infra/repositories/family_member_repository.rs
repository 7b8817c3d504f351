//! Family member repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};

use super::entities::family_member::{self, ActiveModel, Entity as FamilyMemberEntity};
use crate::domain::{FamilyMember, FamilyMemberChanges, NewFamilyMember};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Family member repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FamilyMemberRepository: Send + Sync {
    /// All rows, in whatever order the store returns them
    async fn list_all(&self) -> AppResult<Vec<FamilyMember>>;

    /// Find a family member by ID; absence is not an error
    async fn get_by_id(&self, id: i32) -> AppResult<Option<FamilyMember>>;

    /// Insert and return the stored row with its generated id
    async fn insert(&self, member: NewFamilyMember) -> AppResult<FamilyMember>;

    /// Delete by ID, returning the number of rows removed
    async fn delete_by_id(&self, id: i32) -> AppResult<u64>;

    /// Apply the given changes, returning the number of rows affected
    async fn update_by_id(&self, id: i32, changes: FamilyMemberChanges) -> AppResult<u64>;
}

/// Concrete implementation of FamilyMemberRepository
pub struct FamilyMemberStore {
    db: DatabaseConnection,
}

impl FamilyMemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FamilyMemberRepository for FamilyMemberStore {
    async fn list_all(&self) -> AppResult<Vec<FamilyMember>> {
        let models = FamilyMemberEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(FamilyMember::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<FamilyMember>> {
        let result = FamilyMemberEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(FamilyMember::from))
    }

    async fn insert(&self, member: NewFamilyMember) -> AppResult<FamilyMember> {
        let active_model = ActiveModel {
            id: NotSet,
            first_name: Set(member.first_name),
            last_name: Set(member.last_name),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(FamilyMember::from(model))
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<u64> {
        let result = FamilyMemberEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn update_by_id(&self, id: i32, changes: FamilyMemberChanges) -> AppResult<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let active = ActiveModel {
            id: NotSet,
            first_name: changes.first_name.map(Set).unwrap_or(NotSet),
            last_name: changes.last_name.map(Set).unwrap_or(NotSet),
        };

        let result = FamilyMemberEntity::update_many()
            .set(active)
            .filter(family_member::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
