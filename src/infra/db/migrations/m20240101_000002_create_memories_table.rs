//! Migration: Create memories table.
//!
//! `familymember_id` is indexed but has no foreign key, so removing a family
//! member leaves its memories in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Memories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Memories::MemoryTitle).text().not_null())
                    .col(
                        ColumnDef::new(Memories::MemoryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Memories::MemoryDesc).text().not_null())
                    .col(ColumnDef::new(Memories::MediaUrl).text().not_null())
                    .col(ColumnDef::new(Memories::FamilymemberId).integer().not_null())
                    .col(
                        ColumnDef::new(Memories::DateUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_memories_familymember_id")
                    .table(Memories::Table)
                    .col(Memories::FamilymemberId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Memories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Memories {
    Table,
    Id,
    MemoryTitle,
    MemoryDate,
    MemoryDesc,
    MediaUrl,
    FamilymemberId,
    DateUpdated,
}
