//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! entities, enumerated values, request and response types, and the events
//! announced after state changes.

pub mod attendance;
pub mod constants;
pub mod crew;
pub mod equipment;
pub mod error;
pub mod event;
pub mod nullable;
pub mod permission;
pub mod role;
pub mod time_off;
pub mod trip;
pub mod user;

pub use attendance::{
    Attendance, AttendanceResponse, AttendanceStatus, CreateAttendance, UpdateAttendance,
};
pub use constants::*;
pub use crew::{
    AddCrewMember, CreateCrew, Crew, CrewMember, CrewMemberResponse, CrewResponse, UpdateCrew,
};
pub use equipment::{
    CreateEquipment, Equipment, EquipmentResponse, EquipmentStatus, UpdateEquipment,
};
pub use error::{DomainError, DomainResult};
pub use event::DomainEvent;
pub use permission::{CreatePermission, Permission, PermissionResponse, UpdatePermission};
pub use role::{CreateRole, Role, RoleResponse, UpdateRole};
pub use time_off::{
    CreateTimeOff, LeaveType, TimeOff, TimeOffResponse, TimeOffStatus, UpdateTimeOff,
};
pub use trip::{CreateTrip, Trip, TripResponse, UpdateTrip};
pub use user::{CreateUser, UpdateUser, User, UserProfile, UserResponse, UserStatus};
