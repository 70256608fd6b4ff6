//! Attendance service - Handles daily attendance records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    Attendance, AttendanceResponse, CreateAttendance, DomainEvent, UpdateAttendance,
    ATTENDANCE_CREATED, ATTENDANCE_DELETED, ATTENDANCE_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{AttendanceRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Attendance service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Record attendance for an existing user.
    ///
    /// A second record for the same day is accepted.
    async fn create_attendance(&self, request: CreateAttendance)
        -> AppResult<AttendanceResponse>;

    async fn get_attendance(&self, id: &str) -> AppResult<AttendanceResponse>;

    async fn list_attendance(&self) -> AppResult<Vec<AttendanceResponse>>;

    async fn update_attendance(
        &self,
        id: &str,
        request: UpdateAttendance,
    ) -> AppResult<AttendanceResponse>;

    async fn delete_attendance(&self, id: &str) -> AppResult<()>;

    /// A user's records, newest first
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<AttendanceResponse>>;

    /// The record created for a user on a given day, if any
    async fn find_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceResponse>>;

    /// A user's records created within `[from, to]`
    async fn list_for_user_between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AttendanceResponse>>;
}

/// Concrete implementation of AttendanceService.
pub struct AttendanceManager {
    attendance: Arc<dyn AttendanceRepository>,
    users: Arc<dyn UserRepository>,
    events: EventEmitter,
}

impl AttendanceManager {
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        users: Arc<dyn UserRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            attendance,
            users,
            events,
        }
    }

    async fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("user")
            .map(|_| ())
    }

    fn event(event_type: &str, attendance: &Attendance) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("attendance_id", attendance.id.to_string())
            .with("user_id", attendance.user_id.to_string())
            .with("status", attendance.status.as_str())
    }
}

#[async_trait]
impl AttendanceService for AttendanceManager {
    async fn create_attendance(
        &self,
        request: CreateAttendance,
    ) -> AppResult<AttendanceResponse> {
        self.ensure_user(request.user_id).await?;

        let attendance = self.attendance.create(Attendance::new(request)).await?;
        info!(
            attendance_id = %attendance.id,
            user_id = %attendance.user_id,
            status = %attendance.status,
            "Attendance recorded"
        );

        self.events
            .emit(Self::event(ATTENDANCE_CREATED, &attendance))
            .await;

        Ok(attendance.into())
    }

    async fn get_attendance(&self, id: &str) -> AppResult<AttendanceResponse> {
        let id = parse_id(id, "attendance")?;
        let attendance = self
            .attendance
            .find_by_id(id)
            .await?
            .ok_or_not_found("attendance")?;
        Ok(attendance.into())
    }

    async fn list_attendance(&self) -> AppResult<Vec<AttendanceResponse>> {
        let records = self.attendance.find_all().await?;
        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }

    async fn update_attendance(
        &self,
        id: &str,
        request: UpdateAttendance,
    ) -> AppResult<AttendanceResponse> {
        let id = parse_id(id, "attendance")?;
        let mut attendance = self
            .attendance
            .find_by_id(id)
            .await?
            .ok_or_not_found("attendance")?;

        attendance.apply(request);
        let attendance = self.attendance.update(attendance).await?;
        info!(attendance_id = %attendance.id, "Attendance updated");

        self.events
            .emit(Self::event(ATTENDANCE_UPDATED, &attendance))
            .await;

        Ok(attendance.into())
    }

    async fn delete_attendance(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "attendance")?;
        self.attendance
            .find_by_id(id)
            .await?
            .ok_or_not_found("attendance")?;

        self.attendance.delete(id).await?;
        info!(attendance_id = %id, "Attendance deleted");

        self.events
            .emit(DomainEvent::new(ATTENDANCE_DELETED).with("attendance_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<AttendanceResponse>> {
        let user_id = parse_id(user_id, "user")?;
        self.ensure_user(user_id).await?;

        let records = self.attendance.find_by_user(user_id).await?;
        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }

    async fn find_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceResponse>> {
        let user_id = parse_id(user_id, "user")?;
        let record = self.attendance.find_by_user_and_date(user_id, date).await?;
        Ok(record.map(AttendanceResponse::from))
    }

    async fn list_for_user_between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AttendanceResponse>> {
        let user_id = parse_id(user_id, "user")?;
        if from > to {
            return Err(AppError::invalid_argument("from must not be after to"));
        }

        let records = self
            .attendance
            .find_by_user_between(user_id, from, to)
            .await?;
        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }
}
