//! Migration: Create trips table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Trips::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Trips::StartLocation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Trips::EndLocation).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Trips::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::EndTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Trips::Purpose).text().not_null().default(""))
                    .col(ColumnDef::new(Trips::DistanceKm).double().null())
                    .col(ColumnDef::new(Trips::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Trips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trips_user_start_time")
                    .table(Trips::Table)
                    .col(Trips::UserId)
                    .col(Trips::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Trips {
    Table,
    Id,
    UserId,
    StartLocation,
    EndLocation,
    StartTime,
    EndTime,
    Purpose,
    DistanceKm,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
