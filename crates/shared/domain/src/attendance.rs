//! Attendance domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    ATTENDANCE_STATUS_ABSENT, ATTENDANCE_STATUS_ON_LEAVE, ATTENDANCE_STATUS_PRESENT,
};
use crate::error::DomainError;
use crate::user::{User, UserResponse};

/// Presence status recorded for a user on a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => ATTENDANCE_STATUS_PRESENT,
            AttendanceStatus::Absent => ATTENDANCE_STATUS_ABSENT,
            AttendanceStatus::OnLeave => ATTENDANCE_STATUS_ON_LEAVE,
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ATTENDANCE_STATUS_PRESENT => Ok(AttendanceStatus::Present),
            ATTENDANCE_STATUS_ABSENT => Ok(AttendanceStatus::Absent),
            ATTENDANCE_STATUS_ON_LEAVE => Ok(AttendanceStatus::OnLeave),
            other => Err(DomainError::unknown_value("attendance status", other)),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily presence record of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Recorded user, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Attendance {
    /// Create a new record, defaulting status to Present
    pub fn new(request: CreateAttendance) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            check_in: request.check_in,
            check_out: request.check_out,
            status: request.status.unwrap_or_default(),
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            user: None,
        }
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdateAttendance) {
        if let Some(check_in) = update.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = update.check_out {
            self.check_out = check_out;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Attendance creation data transfer object
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAttendance {
    pub user_id: Uuid,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    /// Defaults to Present
    pub status: Option<AttendanceStatus>,
    pub created_by: Option<Uuid>,
}

/// Attendance update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAttendance {
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub check_in: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub check_out: Option<Option<DateTime<Utc>>>,
    pub status: Option<AttendanceStatus>,
}

/// Attendance response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<Attendance> for AttendanceResponse {
    fn from(attendance: Attendance) -> Self {
        Self {
            id: attendance.id,
            user_id: attendance.user_id,
            check_in: attendance.check_in,
            check_out: attendance.check_out,
            status: attendance.status,
            created_by: attendance.created_by,
            created_at: attendance.created_at,
            updated_at: attendance.updated_at,
            user: attendance.user.map(UserResponse::from),
        }
    }
}
