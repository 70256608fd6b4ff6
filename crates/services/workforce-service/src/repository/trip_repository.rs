//! Trip repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::trip::{self, ActiveModel, Entity as TripEntity, Model};
use super::loaders::attach_users;
use super::write_error;
use common::{AppError, AppResult};
use domain::Trip;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trip repository trait for dependency injection.
///
/// Lists are ordered newest first by start time; reads resolve the user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, trip: Trip) -> AppResult<Trip>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Trip>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Trip>>;

    /// Trips of a user starting within `[from, to]`
    async fn find_by_user_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Trip>>;

    async fn find_all(&self) -> AppResult<Vec<Trip>>;

    async fn update(&self, trip: Trip) -> AppResult<Trip>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of TripRepository
pub struct TripStore {
    db: DatabaseConnection,
}

impl TripStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_users(&self, models: Vec<Model>) -> AppResult<Vec<Trip>> {
        Ok(attach_users(
            &self.db,
            models.into_iter().map(Trip::from).collect(),
            |t: &Trip| Some(t.user_id),
            |t, user| t.user = Some(user),
        )
        .await?)
    }

    async fn one_with_user(&self, model: Option<Model>) -> AppResult<Option<Trip>> {
        match model {
            Some(model) => Ok(self.with_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TripRepository for TripStore {
    async fn create(&self, trip: Trip) -> AppResult<Trip> {
        let model = ActiveModel::from(&trip)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "trip", "trip already exists"))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(trip))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Trip>> {
        let result = TripEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_user(result).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .filter(trip::Column::UserId.eq(user_id))
            .order_by_desc(trip::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_by_user_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .filter(trip::Column::UserId.eq(user_id))
            .filter(trip::Column::StartTime.between(from, to))
            .order_by_desc(trip::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_all(&self) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .order_by_desc(trip::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn update(&self, trip: Trip) -> AppResult<Trip> {
        let model = ActiveModel::from(&trip)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "trip", "trip already exists"))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(trip))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TripEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("trip"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::repository::test_support::executed_sql;

    const NEWEST_FIRST: &str = r#"ORDER BY "trips"."start_time" DESC"#;

    fn empty_store() -> (TripStore, DatabaseConnection) {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        (TripStore::new(db.clone()), db)
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
}
