//! Family member database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::FamilyMember;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "family_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for FamilyMember {
    fn from(model: Model) -> Self {
        FamilyMember {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}
