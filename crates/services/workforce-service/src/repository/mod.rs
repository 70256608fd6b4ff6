//! Repository layer for data access.
//!
//! Each port is a trait the services depend on; each store implements it
//! over a SeaORM connection.

pub mod entities;
mod loaders;

mod attendance_repository;
mod crew_repository;
mod equipment_repository;
mod permission_repository;
mod role_repository;
mod time_off_repository;
mod trip_repository;
mod user_repository;

use common::AppError;
use sea_orm::DbErr;

pub use attendance_repository::{AttendanceRepository, AttendanceStore};
pub use crew_repository::{CrewMemberRepository, CrewMemberStore, CrewRepository, CrewStore};
pub use equipment_repository::{EquipmentRepository, EquipmentStore};
pub use permission_repository::{PermissionRepository, PermissionStore};
pub use role_repository::{RoleRepository, RoleStore};
pub use time_off_repository::{TimeOffRepository, TimeOffStore};
pub use trip_repository::{TripRepository, TripStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use crew_repository::{MockCrewMemberRepository, MockCrewRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use equipment_repository::MockEquipmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use permission_repository::MockPermissionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use time_off_repository::MockTimeOffRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use trip_repository::MockTripRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Map a failed insert or update.
///
/// Unique-constraint violations become `Conflict` with the given message and
/// an update that matched no row becomes `NotFound`.
pub(crate) fn write_error(err: DbErr, entity: &str, conflict: impl Into<String>) -> AppError {
    match err {
        DbErr::RecordNotUpdated => AppError::not_found(entity),
        err => AppError::from_write(err, conflict),
    }
}
