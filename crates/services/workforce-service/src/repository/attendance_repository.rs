//! Attendance repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity, Model};
use super::loaders::attach_users;
use super::write_error;
use common::{AppError, AppResult};
use domain::Attendance;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Attendance repository trait for dependency injection.
///
/// Lists are ordered newest first by creation time; reads resolve the user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, attendance: Attendance) -> AppResult<Attendance>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Attendance>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Attendance>>;

    /// The first record created for a user on a UTC calendar day, if any
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<Attendance>>;

    /// Records created for a user within `[from, to]`
    async fn find_by_user_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Attendance>>;

    async fn find_all(&self) -> AppResult<Vec<Attendance>>;

    async fn update(&self, attendance: Attendance) -> AppResult<Attendance>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AttendanceRepository
pub struct AttendanceStore {
    db: DatabaseConnection,
}

impl AttendanceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_users(&self, models: Vec<Model>) -> AppResult<Vec<Attendance>> {
        let items = models
            .into_iter()
            .map(Attendance::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(attach_users(
            &self.db,
            items,
            |a: &Attendance| Some(a.user_id),
            |a, user| a.user = Some(user),
        )
        .await?)
    }

    async fn one_with_user(&self, model: Option<Model>) -> AppResult<Option<Attendance>> {
        match model {
            Some(model) => Ok(self.with_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AttendanceRepository for AttendanceStore {
    async fn create(&self, attendance: Attendance) -> AppResult<Attendance> {
        let model = ActiveModel::from(&attendance)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "attendance", "attendance record already exists"))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(attendance))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Attendance>> {
        let result = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_user(result).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Attendance>> {
        let models = AttendanceEntity::find()
            .filter(attendance::Column::UserId.eq(user_id))
            .order_by_desc(attendance::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<Attendance>> {
        let start_of_day = date.and_time(chrono::NaiveTime::MIN).and_utc();
        let end_of_day = start_of_day + Duration::days(1);

        let result = AttendanceEntity::find()
            .filter(attendance::Column::UserId.eq(user_id))
            .filter(attendance::Column::CreatedAt.gte(start_of_day))
            .filter(attendance::Column::CreatedAt.lt(end_of_day))
            .order_by_asc(attendance::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_user(result).await
    }

    async fn find_by_user_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Attendance>> {
        let models = AttendanceEntity::find()
            .filter(attendance::Column::UserId.eq(user_id))
            .filter(attendance::Column::CreatedAt.between(from, to))
            .order_by_desc(attendance::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_all(&self) -> AppResult<Vec<Attendance>> {
        let models = AttendanceEntity::find()
            .order_by_desc(attendance::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn update(&self, attendance: Attendance) -> AppResult<Attendance> {
        let model = ActiveModel::from(&attendance)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "attendance", "attendance record already exists"))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(attendance))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = AttendanceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("attendance"));
        }

        Ok(())
    }
}
