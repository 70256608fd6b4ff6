//! Migration: Create workforce users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkforceUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkforceUsers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::FirstName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::LastName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::EmployeeId)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::Email)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::Phone)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::Status)
                            .string_len(20)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::Profile)
                            .string_len(20)
                            .not_null()
                            .default("Field Agent"),
                    )
                    .col(ColumnDef::new(WorkforceUsers::RoleId).uuid().null())
                    .col(ColumnDef::new(WorkforceUsers::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(WorkforceUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkforceUsers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workforce_users_employee_id")
                    .table(WorkforceUsers::Table)
                    .col(WorkforceUsers::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workforce_users_email")
                    .table(WorkforceUsers::Table)
                    .col(WorkforceUsers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workforce_users_role_id")
                    .table(WorkforceUsers::Table)
                    .col(WorkforceUsers::RoleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkforceUsers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WorkforceUsers {
    Table,
    Id,
    FirstName,
    LastName,
    EmployeeId,
    Email,
    Phone,
    Status,
    Profile,
    RoleId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
