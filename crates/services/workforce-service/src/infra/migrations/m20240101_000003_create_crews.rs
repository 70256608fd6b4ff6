//! Migration: Create crews and crew membership tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Crews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Crews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Crews::CrewName).string_len(100).not_null())
                    .col(ColumnDef::new(Crews::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Crews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Crews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CrewMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrewMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrewMembers::CrewId).uuid().not_null())
                    .col(ColumnDef::new(CrewMembers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CrewMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // A user joins a crew at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_crew_members_crew_user")
                    .table(CrewMembers::Table)
                    .col(CrewMembers::CrewId)
                    .col(CrewMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crew_members_user_id")
                    .table(CrewMembers::Table)
                    .col(CrewMembers::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrewMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Crews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Crews {
    Table,
    Id,
    CrewName,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CrewMembers {
    Table,
    Id,
    CrewId,
    UserId,
    CreatedAt,
}
