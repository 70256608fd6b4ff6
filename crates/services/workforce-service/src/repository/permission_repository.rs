//! Permission repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::permission::{self, ActiveModel, Entity as PermissionEntity};
use super::loaders::attach_roles;
use super::write_error;
use common::{AppError, AppResult};
use domain::Permission;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Permission repository trait for dependency injection.
///
/// Reads resolve the referenced role.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn create(&self, permission: Permission) -> AppResult<Permission>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>>;

    /// All permissions granted to a role
    async fn find_by_role(&self, role_id: Uuid) -> AppResult<Vec<Permission>>;

    /// The permission a role holds for one module, if any
    async fn find_by_role_and_module(
        &self,
        role_id: Uuid,
        module_name: &str,
    ) -> AppResult<Option<Permission>>;

    async fn find_all(&self) -> AppResult<Vec<Permission>>;

    async fn update(&self, permission: Permission) -> AppResult<Permission>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Delete every permission of a role, returning how many were removed
    async fn delete_by_role(&self, role_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of PermissionRepository
pub struct PermissionStore {
    db: DatabaseConnection,
}

impl PermissionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_roles(&self, permissions: Vec<Permission>) -> AppResult<Vec<Permission>> {
        Ok(attach_roles(
            &self.db,
            permissions,
            |p: &Permission| Some(p.role_id),
            |p, role| p.role = Some(role),
        )
        .await?)
    }

    async fn with_role(&self, permission: Permission) -> AppResult<Permission> {
        self.with_roles(vec![permission])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("relation loader dropped a permission"))
    }

    fn conflict(permission: &Permission) -> String {
        format!(
            "permission for module '{}' already exists for this role",
            permission.module_name
        )
    }
}

#[async_trait]
impl PermissionRepository for PermissionStore {
    async fn create(&self, permission: Permission) -> AppResult<Permission> {
        let model = ActiveModel::from(&permission)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "permission", Self::conflict(&permission)))?;

        self.with_role(Permission::from(model)).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        let result = PermissionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match result {
            Some(model) => Ok(Some(self.with_role(Permission::from(model)).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_role(&self, role_id: Uuid) -> AppResult<Vec<Permission>> {
        let models = PermissionEntity::find()
            .filter(permission::Column::RoleId.eq(role_id))
            .order_by_asc(permission::Column::ModuleName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_roles(models.into_iter().map(Permission::from).collect())
            .await
    }

    async fn find_by_role_and_module(
        &self,
        role_id: Uuid,
        module_name: &str,
    ) -> AppResult<Option<Permission>> {
        let result = PermissionEntity::find()
            .filter(permission::Column::RoleId.eq(role_id))
            .filter(permission::Column::ModuleName.eq(module_name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Permission::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Permission>> {
        let models = PermissionEntity::find()
            .order_by_asc(permission::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_roles(models.into_iter().map(Permission::from).collect())
            .await
    }

    async fn update(&self, permission: Permission) -> AppResult<Permission> {
        let model = ActiveModel::from(&permission)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "permission", Self::conflict(&permission)))?;

        self.with_role(Permission::from(model)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = PermissionEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("permission"));
        }

        Ok(())
    }

    async fn delete_by_role(&self, role_id: Uuid) -> AppResult<u64> {
        let result = PermissionEntity::delete_many()
            .filter(permission::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
