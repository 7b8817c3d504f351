//! Memory database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Memory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "memories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub memory_title: String,
    pub memory_date: DateTimeUtc,
    pub memory_desc: String,
    pub media_url: String,
    /// Not a declared relation: the referenced row may be gone
    pub familymember_id: i32,
    pub date_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Memory {
    fn from(model: Model) -> Self {
        Memory {
            id: model.id,
            memory_title: model.memory_title,
            memory_date: model.memory_date,
            memory_desc: model.memory_desc,
            media_url: model.media_url,
            familymember_id: model.familymember_id,
            date_updated: model.date_updated,
        }
    }
}
