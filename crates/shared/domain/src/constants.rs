//! Domain-level constants.
//!
//! These constants define enumerated values, validation limits and the
//! names of the events announced after each state change.

// =============================================================================
// Enumerated values (stored and serialized as display strings)
// =============================================================================

pub const USER_STATUS_ACTIVE: &str = "Active";
pub const USER_STATUS_INACTIVE: &str = "Inactive";

pub const USER_PROFILE_FIELD_AGENT: &str = "Field Agent";
pub const USER_PROFILE_MANAGER: &str = "Manager";
pub const USER_PROFILE_ADMINISTRATOR: &str = "Administrator";

pub const EQUIPMENT_STATUS_ACTIVE: &str = "Active";
pub const EQUIPMENT_STATUS_INACTIVE: &str = "Inactive";
pub const EQUIPMENT_STATUS_UNDER_MAINTENANCE: &str = "Under Maintenance";

pub const ATTENDANCE_STATUS_PRESENT: &str = "Present";
pub const ATTENDANCE_STATUS_ABSENT: &str = "Absent";
pub const ATTENDANCE_STATUS_ON_LEAVE: &str = "On Leave";

pub const LEAVE_TYPE_SICK: &str = "Sick Leave";
pub const LEAVE_TYPE_CASUAL: &str = "Casual Leave";
pub const LEAVE_TYPE_PAID: &str = "Paid Leave";
pub const LEAVE_TYPE_UNPAID: &str = "Unpaid Leave";

pub const TIME_OFF_STATUS_PENDING: &str = "Pending";
pub const TIME_OFF_STATUS_APPROVED: &str = "Approved";
pub const TIME_OFF_STATUS_REJECTED: &str = "Rejected";

// =============================================================================
// Validation
// =============================================================================

/// Maximum role name length
pub const MAX_ROLE_NAME_LENGTH: u64 = 50;

/// Maximum length of free-text descriptions
pub const MAX_DESCRIPTION_LENGTH: u64 = 255;

/// Maximum first/last name length
pub const MAX_PERSON_NAME_LENGTH: u64 = 50;

pub const MAX_EMPLOYEE_ID_LENGTH: u64 = 20;
pub const MAX_EMAIL_LENGTH: u64 = 100;
pub const MAX_PHONE_LENGTH: u64 = 20;
pub const MAX_CREW_NAME_LENGTH: u64 = 100;
pub const MAX_EQUIPMENT_NAME_LENGTH: u64 = 100;
pub const MAX_SERIAL_NUMBER_LENGTH: u64 = 50;
pub const MAX_MODULE_NAME_LENGTH: u64 = 50;
pub const MAX_LOCATION_LENGTH: u64 = 255;

// =============================================================================
// Event types
// =============================================================================

pub const ROLE_CREATED: &str = "RoleCreated";
pub const ROLE_UPDATED: &str = "RoleUpdated";
pub const ROLE_DELETED: &str = "RoleDeleted";

pub const PERMISSION_CREATED: &str = "PermissionCreated";
pub const PERMISSION_UPDATED: &str = "PermissionUpdated";
pub const PERMISSION_DELETED: &str = "PermissionDeleted";
pub const PERMISSIONS_REVOKED: &str = "PermissionsRevoked";

pub const USER_CREATED: &str = "UserCreated";
pub const USER_UPDATED: &str = "UserUpdated";
pub const USER_DELETED: &str = "UserDeleted";

pub const CREW_CREATED: &str = "CrewCreated";
pub const CREW_UPDATED: &str = "CrewUpdated";
pub const CREW_DELETED: &str = "CrewDeleted";
pub const CREW_MEMBER_ADDED: &str = "CrewMemberAdded";
pub const CREW_MEMBER_REMOVED: &str = "CrewMemberRemoved";

pub const EQUIPMENT_CREATED: &str = "EquipmentCreated";
pub const EQUIPMENT_UPDATED: &str = "EquipmentUpdated";
pub const EQUIPMENT_DELETED: &str = "EquipmentDeleted";

pub const ATTENDANCE_CREATED: &str = "AttendanceCreated";
pub const ATTENDANCE_UPDATED: &str = "AttendanceUpdated";
pub const ATTENDANCE_DELETED: &str = "AttendanceDeleted";

pub const TIME_OFF_CREATED: &str = "TimeOffCreated";
pub const TIME_OFF_UPDATED: &str = "TimeOffUpdated";
pub const TIME_OFF_DELETED: &str = "TimeOffDeleted";

pub const TRIP_CREATED: &str = "TripCreated";
pub const TRIP_UPDATED: &str = "TripUpdated";
pub const TRIP_DELETED: &str = "TripDeleted";
