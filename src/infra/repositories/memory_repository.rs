//! Memory repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};

use super::entities::memory::{self, ActiveModel, Entity as MemoryEntity};
use crate::domain::{Memory, MemoryChanges, NewMemory};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Memory repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Memory>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Memory>>;

    /// Insert; the store fills in `id` and `date_updated`
    async fn insert(&self, memory: NewMemory) -> AppResult<Memory>;

    async fn delete_by_id(&self, id: i32) -> AppResult<u64>;

    /// Apply the given changes and refresh `date_updated`
    async fn update_by_id(&self, id: i32, changes: MemoryChanges) -> AppResult<u64>;
}

/// Concrete implementation of MemoryRepository
pub struct MemoryStore {
    db: DatabaseConnection,
}

impl MemoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemoryRepository for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Memory>> {
        let models = MemoryEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Memory::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Memory>> {
        let result = MemoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Memory::from))
    }

    async fn insert(&self, memory: NewMemory) -> AppResult<Memory> {
        let active_model = ActiveModel {
            id: NotSet,
            memory_title: Set(memory.memory_title),
            memory_date: Set(memory.memory_date),
            memory_desc: Set(memory.memory_desc),
            media_url: Set(memory.media_url),
            familymember_id: Set(memory.familymember_id),
            date_updated: NotSet,
        };

        let model = active_model.insert(&self.db).await?;
        tracing::debug!(id = model.id, familymember_id = model.familymember_id, "Memory stored");
        Ok(Memory::from(model))
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<u64> {
        let result = MemoryEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn update_by_id(&self, id: i32, changes: MemoryChanges) -> AppResult<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let active = ActiveModel {
            id: NotSet,
            memory_title: changes.memory_title.map(Set).unwrap_or(NotSet),
            memory_date: changes.memory_date.map(Set).unwrap_or(NotSet),
            memory_desc: changes.memory_desc.map(Set).unwrap_or(NotSet),
            media_url: changes.media_url.map(Set).unwrap_or(NotSet),
            familymember_id: changes.familymember_id.map(Set).unwrap_or(NotSet),
            date_updated: Set(Utc::now()),
        };

        let result = MemoryEntity::update_many()
            .set(active)
            .filter(memory::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
