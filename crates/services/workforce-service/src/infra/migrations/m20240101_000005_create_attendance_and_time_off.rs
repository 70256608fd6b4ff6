//! Migration: Create attendance and time-off tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Attendance::CheckIn)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::CheckOut)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::Status)
                            .string_len(20)
                            .not_null()
                            .default("Present"),
                    )
                    .col(ColumnDef::new(Attendance::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_user_created")
                    .table(Attendance::Table)
                    .col(Attendance::UserId)
                    .col(Attendance::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimeOff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TimeOff::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TimeOff::UserId).uuid().not_null())
                    .col(ColumnDef::new(TimeOff::LeaveType).string_len(20).not_null())
                    .col(ColumnDef::new(TimeOff::StartDate).date().not_null())
                    .col(ColumnDef::new(TimeOff::EndDate).date().not_null())
                    .col(ColumnDef::new(TimeOff::Reason).text().not_null().default(""))
                    .col(
                        ColumnDef::new(TimeOff::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(TimeOff::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(TimeOff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeOff::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_off_user_id")
                    .table(TimeOff::Table)
                    .col(TimeOff::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_off_dates")
                    .table(TimeOff::Table)
                    .col(TimeOff::StartDate)
                    .col(TimeOff::EndDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeOff::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    UserId,
    CheckIn,
    CheckOut,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TimeOff {
    Table,
    Id,
    UserId,
    LeaveType,
    StartDate,
    EndDate,
    Reason,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
