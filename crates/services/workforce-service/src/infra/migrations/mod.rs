//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}
//!
//! Tables reference each other by id columns only; there are no foreign-key
//! constraints, so deleting a row never cascades.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_roles_and_permissions;
mod m20240101_000002_create_workforce_users;
mod m20240101_000003_create_crews;
mod m20240101_000004_create_equipment;
mod m20240101_000005_create_attendance_and_time_off;
mod m20240101_000006_create_trips;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_roles_and_permissions::Migration),
            Box::new(m20240101_000002_create_workforce_users::Migration),
            Box::new(m20240101_000003_create_crews::Migration),
            Box::new(m20240101_000004_create_equipment::Migration),
            Box::new(m20240101_000005_create_attendance_and_time_off::Migration),
            Box::new(m20240101_000006_create_trips::Migration),
        ]
    }
}
