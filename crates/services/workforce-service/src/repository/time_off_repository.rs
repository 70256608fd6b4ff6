//! Time-off repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::time_off::{self, ActiveModel, Entity as TimeOffEntity, Model};
use super::loaders::attach_users;
use super::write_error;
use common::{AppError, AppResult};
use domain::{TimeOff, TimeOffStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Time-off repository trait for dependency injection.
///
/// Lists are ordered newest first by start date; reads resolve the user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TimeOffRepository: Send + Sync {
    async fn create(&self, time_off: TimeOff) -> AppResult<TimeOff>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimeOff>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<TimeOff>>;

    async fn find_by_status(&self, status: TimeOffStatus) -> AppResult<Vec<TimeOff>>;

    /// Requests covering any day in `[from, to]`
    async fn find_overlapping(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<TimeOff>>;

    async fn find_all(&self) -> AppResult<Vec<TimeOff>>;

    async fn update(&self, time_off: TimeOff) -> AppResult<TimeOff>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of TimeOffRepository
pub struct TimeOffStore {
    db: DatabaseConnection,
}

impl TimeOffStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_users(&self, models: Vec<Model>) -> AppResult<Vec<TimeOff>> {
        let items = models
            .into_iter()
            .map(TimeOff::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(attach_users(
            &self.db,
            items,
            |t: &TimeOff| Some(t.user_id),
            |t, user| t.user = Some(user),
        )
        .await?)
    }

    async fn one_with_user(&self, model: Option<Model>) -> AppResult<Option<TimeOff>> {
        match model {
            Some(model) => Ok(self.with_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TimeOffRepository for TimeOffStore {
    async fn create(&self, time_off: TimeOff) -> AppResult<TimeOff> {
        let model = ActiveModel::from(&time_off)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "time off", "time-off request already exists"))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(time_off))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimeOff>> {
        let result = TimeOffEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_user(result).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<TimeOff>> {
        let models = TimeOffEntity::find()
            .filter(time_off::Column::UserId.eq(user_id))
            .order_by_desc(time_off::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_by_status(&self, status: TimeOffStatus) -> AppResult<Vec<TimeOff>> {
        let models = TimeOffEntity::find()
            .filter(time_off::Column::Status.eq(status.as_str()))
            .order_by_desc(time_off::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_overlapping(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<TimeOff>> {
        let models = TimeOffEntity::find()
            .filter(time_off::Column::StartDate.lte(to))
            .filter(time_off::Column::EndDate.gte(from))
            .order_by_desc(time_off::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_all(&self) -> AppResult<Vec<TimeOff>> {
        let models = TimeOffEntity::find()
            .order_by_desc(time_off::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn update(&self, time_off: TimeOff) -> AppResult<TimeOff> {
        let model = ActiveModel::from(&time_off)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "time off", "time-off request already exists"))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(time_off))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TimeOffEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("time off"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::repository::test_support::executed_sql;

    const NEWEST_FIRST: &str = r#"ORDER BY "time_off"."start_date" DESC"#;

    fn empty_store() -> (TimeOffStore, DatabaseConnection) {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        (TimeOffStore::new(db.clone()), db)
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let (store, db) = empty_store();
        assert!(store.find_all().await.unwrap().is_empty());

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains(NEWEST_FIRST), "unexpected query: {}", sql[0]);
    }

    #[tokio::test]
    async fn test_find_by_user_newest_first() {
        let (store, db) = empty_store();
        assert!(store.find_by_user(Uuid::new_v4()).await.unwrap().is_empty());

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains(NEWEST_FIRST), "unexpected query: {}", sql[0]);
    }

    #[tokio::test]
    async fn test_find_by_status_newest_first() {
        let (store, db) = empty_store();
        assert!(store.find_by_status(TimeOffStatus::Pending).await.unwrap().is_empty());

        let sql = executed_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains(NEWEST_FIRST), "unexpected query: {}", sql[0]);
    }
}
