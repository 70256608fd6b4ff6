//! Service layer - business logic for each entity family.
//!
//! Every service follows the same shape: validate the request, check natural
//! keys and referenced records through the repository ports, persist, then
//! announce the change through the event emitter.

mod attendance_service;
mod container;
mod crew_service;
mod equipment_service;
mod permission_service;
mod role_service;
mod time_off_service;
mod trip_service;
mod user_service;

use uuid::Uuid;

use common::{AppError, AppResult};

pub use attendance_service::{AttendanceManager, AttendanceService};
pub use container::Services;
pub use crew_service::{CrewManager, CrewService};
pub use equipment_service::{EquipmentManager, EquipmentService};
pub use permission_service::{PermissionManager, PermissionService};
pub use role_service::{RoleManager, RoleService};
pub use time_off_service::{TimeOffManager, TimeOffService};
pub use trip_service::{TripManager, TripService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use attendance_service::MockAttendanceService;
#[cfg(any(test, feature = "test-utils"))]
pub use crew_service::MockCrewService;
#[cfg(any(test, feature = "test-utils"))]
pub use equipment_service::MockEquipmentService;
#[cfg(any(test, feature = "test-utils"))]
pub use permission_service::MockPermissionService;
#[cfg(any(test, feature = "test-utils"))]
pub use role_service::MockRoleService;
#[cfg(any(test, feature = "test-utils"))]
pub use time_off_service::MockTimeOffService;
#[cfg(any(test, feature = "test-utils"))]
pub use trip_service::MockTripService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;

/// Parse a textual identifier, rejecting malformed input.
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::invalid_argument(format!("invalid {} id '{}'", entity, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "role").unwrap(), id);

        let err = parse_id("not-a-uuid", "role").unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert_eq!(err.user_message(), "invalid role id 'not-a-uuid'");
    }
}
