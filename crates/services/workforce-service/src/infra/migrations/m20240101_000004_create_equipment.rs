//! Migration: Create equipment table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipment::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equipment::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Equipment::SerialNumber).string_len(50).null())
                    .col(ColumnDef::new(Equipment::AssignedToUser).uuid().null())
                    .col(
                        ColumnDef::new(Equipment::Status)
                            .string_len(20)
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Equipment::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Equipment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Equipment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL serial numbers do not collide under a unique index
        manager
            .create_index(
                Index::create()
                    .name("idx_equipment_serial_number")
                    .table(Equipment::Table)
                    .col(Equipment::SerialNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_equipment_assigned_to_user")
                    .table(Equipment::Table)
                    .col(Equipment::AssignedToUser)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Equipment {
    Table,
    Id,
    Name,
    SerialNumber,
    AssignedToUser,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
