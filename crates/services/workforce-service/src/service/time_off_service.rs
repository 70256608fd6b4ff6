//! Time-off service - Handles leave requests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreateTimeOff, DomainEvent, TimeOff, TimeOffResponse, TimeOffStatus, UpdateTimeOff,
    TIME_OFF_CREATED, TIME_OFF_DELETED, TIME_OFF_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{TimeOffRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Time-off service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TimeOffService: Send + Sync {
    /// File a pending request; the date range must be ordered
    async fn create_time_off(&self, request: CreateTimeOff) -> AppResult<TimeOffResponse>;

    async fn get_time_off(&self, id: &str) -> AppResult<TimeOffResponse>;

    async fn list_time_off(&self) -> AppResult<Vec<TimeOffResponse>>;

    /// Update fields including status; any status may be set
    async fn update_time_off(&self, id: &str, request: UpdateTimeOff)
        -> AppResult<TimeOffResponse>;

    async fn delete_time_off(&self, id: &str) -> AppResult<()>;

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<TimeOffResponse>>;

    /// Requests in a status given by its display name ("Pending", ...)
    async fn list_by_status(&self, status: &str) -> AppResult<Vec<TimeOffResponse>>;

    /// Requests covering any day in `[from, to]`
    async fn list_overlapping(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<TimeOffResponse>>;
}

/// Concrete implementation of TimeOffService.
pub struct TimeOffManager {
    time_off: Arc<dyn TimeOffRepository>,
    users: Arc<dyn UserRepository>,
    events: EventEmitter,
}

impl TimeOffManager {
    pub fn new(
        time_off: Arc<dyn TimeOffRepository>,
        users: Arc<dyn UserRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            time_off,
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

    fn event(event_type: &str, time_off: &TimeOff) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("time_off_id", time_off.id.to_string())
            .with("user_id", time_off.user_id.to_string())
            .with("status", time_off.status.as_str())
    }
}

#[async_trait]
impl TimeOffService for TimeOffManager {
    async fn create_time_off(&self, request: CreateTimeOff) -> AppResult<TimeOffResponse> {
        let time_off = TimeOff::new(request)?;
        self.ensure_user(time_off.user_id).await?;

        let time_off = self.time_off.create(time_off).await?;
        info!(
            time_off_id = %time_off.id,
            user_id = %time_off.user_id,
            leave_type = %time_off.leave_type,
            days = time_off.days(),
            "Time off requested"
        );

        self.events
            .emit(Self::event(TIME_OFF_CREATED, &time_off))
            .await;

        Ok(time_off.into())
    }

    async fn get_time_off(&self, id: &str) -> AppResult<TimeOffResponse> {
        let id = parse_id(id, "time off")?;
        let time_off = self
            .time_off
            .find_by_id(id)
            .await?
            .ok_or_not_found("time off")?;
        Ok(time_off.into())
    }

    async fn list_time_off(&self) -> AppResult<Vec<TimeOffResponse>> {
        let requests = self.time_off.find_all().await?;
        Ok(requests.into_iter().map(TimeOffResponse::from).collect())
    }

    async fn update_time_off(
        &self,
        id: &str,
        request: UpdateTimeOff,
    ) -> AppResult<TimeOffResponse> {
        let id = parse_id(id, "time off")?;
        let mut time_off = self
            .time_off
            .find_by_id(id)
            .await?
            .ok_or_not_found("time off")?;

        time_off.apply(request)?;
        let time_off = self.time_off.update(time_off).await?;
        info!(time_off_id = %time_off.id, status = %time_off.status, "Time off updated");

        self.events
            .emit(Self::event(TIME_OFF_UPDATED, &time_off))
            .await;

        Ok(time_off.into())
    }

    async fn delete_time_off(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "time off")?;
        self.time_off
            .find_by_id(id)
            .await?
            .ok_or_not_found("time off")?;

        self.time_off.delete(id).await?;
        info!(time_off_id = %id, "Time off deleted");

        self.events
            .emit(DomainEvent::new(TIME_OFF_DELETED).with("time_off_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<TimeOffResponse>> {
        let user_id = parse_id(user_id, "user")?;
        self.ensure_user(user_id).await?;

        let requests = self.time_off.find_by_user(user_id).await?;
        Ok(requests.into_iter().map(TimeOffResponse::from).collect())
    }

    async fn list_by_status(&self, status: &str) -> AppResult<Vec<TimeOffResponse>> {
        let status: TimeOffStatus = status.parse()?;

        let requests = self.time_off.find_by_status(status).await?;
        Ok(requests.into_iter().map(TimeOffResponse::from).collect())
    }

    async fn list_overlapping(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<TimeOffResponse>> {
        if from > to {
            return Err(AppError::invalid_argument("from must not be after to"));
        }

        let requests = self.time_off.find_overlapping(from, to).await?;
        Ok(requests.into_iter().map(TimeOffResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::events::MockEventPublisher;
    use crate::repository::{MockTimeOffRepository, MockUserRepository};
    use domain::{CreateUser, LeaveType, User};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> User {
        User::new(CreateUser {
            first_name: "Yaw".to_string(),
            last_name: "Asante".to_string(),
            employee_id: "E-300".to_string(),
            email: "yaw@example.com".to_string(),
            phone: String::new(),
            status: None,
            profile: None,
            role_id: None,
            created_by: None,
        })
    }

    fn create_request(user_id: Uuid, start: NaiveDate, end: NaiveDate) -> CreateTimeOff {
        CreateTimeOff {
            user_id,
            leave_type: LeaveType::Casual,
            start_date: start,
            end_date: end,
            reason: "Family event".to_string(),
            created_by: None,
        }
    }

    fn service(time_off: MockTimeOffRepository, users: MockUserRepository) -> TimeOffManager {
        TimeOffManager::new(Arc::new(time_off), Arc::new(users), EventEmitter::disabled())
    }

    #[tokio::test]
    async fn test_create_is_pending() {
        let member = user();
        let user_id = member.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member.clone())));
        let mut time_off = MockTimeOffRepository::new();
        time_off.expect_create().returning(|t| Ok(t));

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| event.event_type == TIME_OFF_CREATED && event.field("status") == Some("Pending"))
            .times(1)
            .returning(|_| Ok(()));

        let service = TimeOffManager::new(
            Arc::new(time_off),
            Arc::new(users),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        let response = service
            .create_time_off(create_request(user_id, date(2024, 3, 4), date(2024, 3, 6)))
            .await
            .unwrap();

        assert_eq!(response.status, TimeOffStatus::Pending);
        assert_eq!(response.leave_type, LeaveType::Casual);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_dates() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();
        let mut time_off = MockTimeOffRepository::new();
        time_off.expect_create().never();

        let result = service(time_off, users)
            .create_time_off(create_request(
                Uuid::new_v4(),
                date(2024, 3, 6),
                date(2024, 3, 4),
            ))
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_update_end_before_start() {
        let existing =
            TimeOff::new(create_request(Uuid::new_v4(), date(2024, 5, 1), date(2024, 5, 3)))
                .unwrap();
        let id = existing.id;

        let mut time_off = MockTimeOffRepository::new();
        time_off
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        time_off.expect_update().never();

        let update = UpdateTimeOff {
            end_date: Some(date(2024, 4, 30)),
            ..Default::default()
        };
        let result = service(time_off, MockUserRepository::new())
            .update_time_off(&id.to_string(), update)
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_update_approves() {
        let existing =
            TimeOff::new(create_request(Uuid::new_v4(), date(2024, 5, 1), date(2024, 5, 3)))
                .unwrap();
        let id = existing.id;

        let mut time_off = MockTimeOffRepository::new();
        time_off
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        time_off.expect_update().returning(|t| Ok(t));

        let update = UpdateTimeOff {
            status: Some(TimeOffStatus::Approved),
            ..Default::default()
        };
        let response = service(time_off, MockUserRepository::new())
            .update_time_off(&id.to_string(), update)
            .await
            .unwrap();

        assert_eq!(response.status, TimeOffStatus::Approved);
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let mut time_off = MockTimeOffRepository::new();
        time_off
            .expect_find_by_status()
            .with(eq(TimeOffStatus::Rejected))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(time_off, MockUserRepository::new());
        assert!(service.list_by_status("Rejected").await.unwrap().is_empty());

        let unknown = service.list_by_status("Cancelled").await;
        assert!(matches!(unknown, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_list_overlapping_rejects_inverted_range() {
        let mut time_off = MockTimeOffRepository::new();
        time_off.expect_find_overlapping().never();

        let result = service(time_off, MockUserRepository::new())
            .list_overlapping(date(2024, 6, 2), date(2024, 6, 1))
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }
}
