//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::http::handlers::{
    attendance_handler, crew_handler, equipment_handler, health_handler, permission_handler,
    role_handler, time_off_handler, trip_handler, user_handler,
};
use domain::{
    AddCrewMember, AttendanceResponse, AttendanceStatus, CreateAttendance, CreateCrew,
    CreateEquipment, CreatePermission, CreateRole, CreateTimeOff, CreateTrip, CreateUser,
    CrewMemberResponse, CrewResponse, EquipmentResponse, EquipmentStatus, LeaveType,
    PermissionResponse, RoleResponse, TimeOffResponse, TimeOffStatus, TripResponse,
    UpdateAttendance, UpdateCrew, UpdateEquipment, UpdatePermission, UpdateRole, UpdateTimeOff,
    UpdateTrip, UpdateUser, UserProfile, UserResponse, UserStatus,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler::health_check,
        role_handler::create_role,
        role_handler::list_roles,
        role_handler::get_role,
        role_handler::update_role,
        role_handler::delete_role,
        role_handler::list_role_permissions,
        role_handler::revoke_role_permissions,
        role_handler::list_role_users,
        permission_handler::create_permission,
        permission_handler::list_permissions,
        permission_handler::get_permission,
        permission_handler::update_permission,
        permission_handler::delete_permission,
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::list_user_crews,
        user_handler::list_user_equipment,
        user_handler::list_user_attendance,
        user_handler::list_user_time_off,
        user_handler::list_user_trips,
        crew_handler::create_crew,
        crew_handler::list_crews,
        crew_handler::get_crew,
        crew_handler::update_crew,
        crew_handler::delete_crew,
        crew_handler::list_members,
        crew_handler::add_member,
        crew_handler::remove_member,
        equipment_handler::create_equipment,
        equipment_handler::list_equipment,
        equipment_handler::get_equipment,
        equipment_handler::update_equipment,
        equipment_handler::delete_equipment,
        attendance_handler::create_attendance,
        attendance_handler::list_attendance,
        attendance_handler::get_attendance,
        attendance_handler::update_attendance,
        attendance_handler::delete_attendance,
        time_off_handler::create_time_off,
        time_off_handler::list_time_off,
        time_off_handler::get_time_off,
        time_off_handler::update_time_off,
        time_off_handler::delete_time_off,
        time_off_handler::list_by_status,
        trip_handler::create_trip,
        trip_handler::list_trips,
        trip_handler::get_trip,
        trip_handler::update_trip,
        trip_handler::delete_trip,
    ),
    components(
        schemas(
            health_handler::HealthResponse,
            health_handler::DependencyStatus,
            health_handler::DependencyHealth,
            role_handler::RevokedPermissions,
            CreateRole,
            UpdateRole,
            RoleResponse,
            CreatePermission,
            UpdatePermission,
            PermissionResponse,
            CreateUser,
            UpdateUser,
            UserResponse,
            UserStatus,
            UserProfile,
            CreateCrew,
            UpdateCrew,
            AddCrewMember,
            CrewResponse,
            CrewMemberResponse,
            CreateEquipment,
            UpdateEquipment,
            EquipmentResponse,
            EquipmentStatus,
            CreateAttendance,
            UpdateAttendance,
            AttendanceResponse,
            AttendanceStatus,
            CreateTimeOff,
            UpdateTimeOff,
            TimeOffResponse,
            TimeOffStatus,
            LeaveType,
            CreateTrip,
            UpdateTrip,
            TripResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Roles", description = "Role management"),
        (name = "Permissions", description = "Per-module role permissions"),
        (name = "Users", description = "Workforce users and their records"),
        (name = "Crews", description = "Crews and membership"),
        (name = "Equipment", description = "Equipment inventory and assignment"),
        (name = "Attendance", description = "Daily attendance"),
        (name = "Time Off", description = "Leave requests"),
        (name = "Trips", description = "Field trip logs"),
    )
)]
pub struct ApiDoc;
