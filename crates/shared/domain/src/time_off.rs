//! Time-off domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    LEAVE_TYPE_CASUAL, LEAVE_TYPE_PAID, LEAVE_TYPE_SICK, LEAVE_TYPE_UNPAID,
    TIME_OFF_STATUS_APPROVED, TIME_OFF_STATUS_PENDING, TIME_OFF_STATUS_REJECTED,
};
use crate::error::{DomainError, DomainResult};
use crate::user::{User, UserResponse};

/// Kind of leave requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LeaveType {
    #[serde(rename = "Sick Leave")]
    Sick,
    #[serde(rename = "Casual Leave")]
    Casual,
    #[serde(rename = "Paid Leave")]
    Paid,
    #[serde(rename = "Unpaid Leave")]
    Unpaid,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Sick => LEAVE_TYPE_SICK,
            LeaveType::Casual => LEAVE_TYPE_CASUAL,
            LeaveType::Paid => LEAVE_TYPE_PAID,
            LeaveType::Unpaid => LEAVE_TYPE_UNPAID,
        }
    }
}

impl FromStr for LeaveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LEAVE_TYPE_SICK => Ok(LeaveType::Sick),
            LEAVE_TYPE_CASUAL => Ok(LeaveType::Casual),
            LEAVE_TYPE_PAID => Ok(LeaveType::Paid),
            LEAVE_TYPE_UNPAID => Ok(LeaveType::Unpaid),
            other => Err(DomainError::unknown_value("leave type", other)),
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval status of a time-off request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TimeOffStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl TimeOffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOffStatus::Pending => TIME_OFF_STATUS_PENDING,
            TimeOffStatus::Approved => TIME_OFF_STATUS_APPROVED,
            TimeOffStatus::Rejected => TIME_OFF_STATUS_REJECTED,
        }
    }
}

impl FromStr for TimeOffStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TIME_OFF_STATUS_PENDING => Ok(TimeOffStatus::Pending),
            TIME_OFF_STATUS_APPROVED => Ok(TimeOffStatus::Approved),
            TIME_OFF_STATUS_REJECTED => Ok(TimeOffStatus::Rejected),
            other => Err(DomainError::unknown_value("time-off status", other)),
        }
    }
}

impl std::fmt::Display for TimeOffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leave request covering an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOff {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: TimeOffStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Requesting user, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl TimeOff {
    /// Create a new pending request
    pub fn new(request: CreateTimeOff) -> DomainResult<Self> {
        let now = Utc::now();
        let time_off = Self {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason,
            status: TimeOffStatus::Pending,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            user: None,
        };
        time_off.check_dates()?;
        Ok(time_off)
    }

    /// Apply a partial update; the resulting date range must stay ordered
    pub fn apply(&mut self, update: UpdateTimeOff) -> DomainResult<()> {
        if let Some(leave_type) = update.leave_type {
            self.leave_type = leave_type;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(reason) = update.reason {
            self.reason = reason;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.check_dates()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Number of calendar days covered, both ends inclusive
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    fn check_dates(&self) -> DomainResult<()> {
        if self.start_date > self.end_date {
            return Err(DomainError::validation(
                "start_date must not be after end_date",
            ));
        }
        Ok(())
    }
}

/// Time-off creation data transfer object
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateTimeOff {
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub created_by: Option<Uuid>,
}

/// Time-off update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateTimeOff {
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub status: Option<TimeOffStatus>,
}

/// Time-off response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimeOffResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: TimeOffStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<TimeOff> for TimeOffResponse {
    fn from(time_off: TimeOff) -> Self {
        Self {
            id: time_off.id,
            user_id: time_off.user_id,
            leave_type: time_off.leave_type,
            start_date: time_off.start_date,
            end_date: time_off.end_date,
            reason: time_off.reason,
            status: time_off.status,
            created_by: time_off.created_by,
            created_at: time_off.created_at,
            updated_at: time_off.updated_at,
            user: time_off.user.map(UserResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(start: NaiveDate, end: NaiveDate) -> CreateTimeOff {
        CreateTimeOff {
            user_id: Uuid::new_v4(),
            leave_type: LeaveType::Casual,
            start_date: start,
            end_date: end,
            reason: "family".to_string(),
            created_by: None,
        }
    }

    #[test]
    fn test_new_is_pending() {
        let time_off = TimeOff::new(request(date(2024, 3, 1), date(2024, 3, 3))).unwrap();
        assert_eq!(time_off.status, TimeOffStatus::Pending);
        assert_eq!(time_off.days(), 3);
    }

    #[test]
    fn test_single_day_allowed() {
        let time_off = TimeOff::new(request(date(2024, 3, 1), date(2024, 3, 1))).unwrap();
        assert_eq!(time_off.days(), 1);
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let result = TimeOff::new(request(date(2024, 3, 5), date(2024, 3, 1)));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_apply_rechecks_range() {
        let mut time_off = TimeOff::new(request(date(2024, 3, 1), date(2024, 3, 3))).unwrap();
        let result = time_off.apply(UpdateTimeOff {
            start_date: Some(date(2024, 3, 10)),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_leave_type_strings() {
        assert_eq!(
            serde_json::to_string(&LeaveType::Sick).unwrap(),
            "\"Sick Leave\""
        );
        assert_eq!("Rejected".parse::<TimeOffStatus>().unwrap(), TimeOffStatus::Rejected);
        assert!("Maybe".parse::<TimeOffStatus>().is_err());
    }
}
