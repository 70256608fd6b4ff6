//! Crew and crew membership repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::crew::{self, ActiveModel, Entity as CrewEntity};
use super::entities::crew_member::{self, Entity as CrewMemberEntity};
use super::loaders::{attach_member_users, members_by_crew};
use super::write_error;
use common::{AppError, AppResult};
use domain::{Crew, CrewMember};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Crew repository trait for dependency injection.
///
/// Reads resolve each crew's members together with their users.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CrewRepository: Send + Sync {
    async fn create(&self, crew: Crew) -> AppResult<Crew>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Crew>>;

    async fn find_all(&self) -> AppResult<Vec<Crew>>;

    async fn update(&self, crew: Crew) -> AppResult<Crew>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Crew membership repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CrewMemberRepository: Send + Sync {
    async fn create(&self, member: CrewMember) -> AppResult<CrewMember>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CrewMember>>;

    /// Members of a crew, oldest first
    async fn find_by_crew(&self, crew_id: Uuid) -> AppResult<Vec<CrewMember>>;

    /// Memberships held by a user
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<CrewMember>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Remove a user from a crew, returning whether a membership existed
    async fn delete_by_crew_and_user(&self, crew_id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of CrewRepository
pub struct CrewStore {
    db: DatabaseConnection,
}

impl CrewStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_members(&self, models: Vec<crew::Model>) -> AppResult<Vec<Crew>> {
        let mut members = members_by_crew(&self.db, models.iter().map(|m| m.id).collect()).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let mut crew = Crew::from(model);
                crew.members = members.remove(&crew.id).unwrap_or_default();
                crew
            })
            .collect())
    }
}

#[async_trait]
impl CrewRepository for CrewStore {
    async fn create(&self, crew: Crew) -> AppResult<Crew> {
        let model = ActiveModel::from(&crew)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "crew", format!("crew '{}' already exists", crew.crew_name)))?;

        Ok(Crew::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Crew>> {
        let result = CrewEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match result {
            Some(model) => Ok(self.with_members(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Crew>> {
        let models = CrewEntity::find()
            .order_by_asc(crew::Column::CrewName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_members(models).await
    }

    async fn update(&self, crew: Crew) -> AppResult<Crew> {
        let model = ActiveModel::from(&crew)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "crew", format!("crew '{}' already exists", crew.crew_name)))?;

        Ok(self
            .with_members(vec![model])
            .await?
            .pop()
            .unwrap_or(crew))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CrewEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("crew"));
        }

        Ok(())
    }
}

/// Concrete implementation of CrewMemberRepository
pub struct CrewMemberStore {
    db: DatabaseConnection,
}

impl CrewMemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_users(&self, models: Vec<crew_member::Model>) -> AppResult<Vec<CrewMember>> {
        Ok(attach_member_users(&self.db, models.into_iter().map(CrewMember::from).collect()).await?)
    }
}

#[async_trait]
impl CrewMemberRepository for CrewMemberStore {
    async fn create(&self, member: CrewMember) -> AppResult<CrewMember> {
        let model = crew_member::ActiveModel::from(&member)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "crew member", "user is already a member of this crew"))?;

        Ok(self
            .with_users(vec![model])
            .await?
            .pop()
            .unwrap_or(member))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CrewMember>> {
        let result = CrewMemberEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match result {
            Some(model) => Ok(self.with_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_crew(&self, crew_id: Uuid) -> AppResult<Vec<CrewMember>> {
        let models = CrewMemberEntity::find()
            .filter(crew_member::Column::CrewId.eq(crew_id))
            .order_by_asc(crew_member::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<CrewMember>> {
        let models = CrewMemberEntity::find()
            .filter(crew_member::Column::UserId.eq(user_id))
            .order_by_asc(crew_member::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CrewMemberEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("crew member"));
        }

        Ok(())
    }

    async fn delete_by_crew_and_user(&self, crew_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = CrewMemberEntity::delete_many()
            .filter(crew_member::Column::CrewId.eq(crew_id))
            .filter(crew_member::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
