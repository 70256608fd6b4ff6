//! Role repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::role::{self, ActiveModel, Entity as RoleEntity};
use super::write_error;
use common::{AppError, AppResult};
use domain::Role;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Role repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert a new role
    async fn create(&self, role: Role) -> AppResult<Role>;

    /// Find role by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Find role by its unique name
    async fn find_by_name(&self, role_name: &str) -> AppResult<Option<Role>>;

    /// List all roles, ordered by name
    async fn find_all(&self) -> AppResult<Vec<Role>>;

    /// Persist all fields of an existing role
    async fn update(&self, role: Role) -> AppResult<Role>;

    /// Delete role by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of RoleRepository
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn conflict(role: &Role) -> String {
        format!("role with name '{}' already exists", role.role_name)
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn create(&self, role: Role) -> AppResult<Role> {
        let model = ActiveModel::from(&role)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "role", Self::conflict(&role)))?;

        Ok(Role::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        let result = RoleEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Role::from))
    }

    async fn find_by_name(&self, role_name: &str) -> AppResult<Option<Role>> {
        let result = RoleEntity::find()
            .filter(role::Column::RoleName.eq(role_name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Role::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .order_by_asc(role::Column::RoleName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    async fn update(&self, role: Role) -> AppResult<Role> {
        let model = ActiveModel::from(&role)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "role", Self::conflict(&role)))?;

        Ok(Role::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = RoleEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("role"));
        }

        Ok(())
    }
}
