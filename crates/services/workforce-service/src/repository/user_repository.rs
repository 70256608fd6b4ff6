//! Workforce user repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::workforce_user::{self, ActiveModel, Entity as UserEntity, Model};
use super::loaders::attach_roles;
use super::write_error;
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Reads resolve the referenced role.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_employee_id(&self, employee_id: &str) -> AppResult<Option<User>>;

    /// Users holding a role
    async fn find_by_role(&self, role_id: Uuid) -> AppResult<Vec<User>>;

    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn update(&self, user: User) -> AppResult<User>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_roles(&self, models: Vec<Model>) -> AppResult<Vec<User>> {
        let users = models
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(attach_roles(
            &self.db,
            users,
            |u: &User| u.role_id,
            |u, role| u.role = Some(role),
        )
        .await?)
    }

    async fn one_with_role(&self, model: Option<Model>) -> AppResult<Option<User>> {
        match model {
            Some(model) => Ok(self.with_roles(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    fn conflict(user: &User) -> String {
        format!(
            "user with employee_id '{}' or email '{}' already exists",
            user.employee_id, user.email
        )
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(&user)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "user", Self::conflict(&user)))?;

        self.one_with_role(Some(model))
            .await?
            .ok_or_else(|| AppError::internal("inserted user could not be read back"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_role(result).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(workforce_user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_role(result).await
    }

    async fn find_by_employee_id(&self, employee_id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(workforce_user::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_role(result).await
    }

    async fn find_by_role(&self, role_id: Uuid) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(workforce_user::Column::RoleId.eq(role_id))
            .order_by_asc(workforce_user::Column::LastName)
            .order_by_asc(workforce_user::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_roles(models).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(workforce_user::Column::LastName)
            .order_by_asc(workforce_user::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_roles(models).await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(&user)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "user", Self::conflict(&user)))?;

        self.one_with_role(Some(model))
            .await?
            .ok_or_else(|| AppError::internal("updated user could not be read back"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("user"));
        }

        Ok(())
    }
}
