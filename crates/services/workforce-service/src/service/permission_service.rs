//! Permission service - Handles role permission business logic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreatePermission, DomainEvent, Permission, PermissionResponse, UpdatePermission,
    PERMISSIONS_REVOKED, PERMISSION_CREATED, PERMISSION_DELETED, PERMISSION_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{PermissionRepository, RoleRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Permission service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Grant a role its flags for one module; a role holds one permission per module
    async fn create_permission(&self, request: CreatePermission) -> AppResult<PermissionResponse>;

    async fn get_permission(&self, id: &str) -> AppResult<PermissionResponse>;

    async fn list_permissions(&self) -> AppResult<Vec<PermissionResponse>>;

    async fn update_permission(
        &self,
        id: &str,
        request: UpdatePermission,
    ) -> AppResult<PermissionResponse>;

    async fn delete_permission(&self, id: &str) -> AppResult<()>;

    /// Permissions granted to a role
    async fn list_for_role(&self, role_id: &str) -> AppResult<Vec<PermissionResponse>>;

    /// Remove every permission of a role, returning how many were removed
    async fn revoke_for_role(&self, role_id: &str) -> AppResult<u64>;
}

/// Concrete implementation of PermissionService.
pub struct PermissionManager {
    permissions: Arc<dyn PermissionRepository>,
    roles: Arc<dyn RoleRepository>,
    events: EventEmitter,
}

impl PermissionManager {
    pub fn new(
        permissions: Arc<dyn PermissionRepository>,
        roles: Arc<dyn RoleRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            permissions,
            roles,
            events,
        }
    }

    async fn ensure_role(&self, role_id: Uuid) -> AppResult<()> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_not_found("role")
            .map(|_| ())
    }

    fn event(event_type: &str, permission: &Permission) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("permission_id", permission.id.to_string())
            .with("role_id", permission.role_id.to_string())
            .with("module_name", permission.module_name.clone())
    }
}

#[async_trait]
impl PermissionService for PermissionManager {
    async fn create_permission(&self, request: CreatePermission) -> AppResult<PermissionResponse> {
        request.validate()?;
        self.ensure_role(request.role_id).await?;

        if self
            .permissions
            .find_by_role_and_module(request.role_id, &request.module_name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "permission for module '{}' already exists for this role",
                request.module_name
            )));
        }

        let permission = self.permissions.create(Permission::new(request)).await?;
        info!(
            permission_id = %permission.id,
            role_id = %permission.role_id,
            module_name = %permission.module_name,
            "Permission created"
        );

        self.events
            .emit(Self::event(PERMISSION_CREATED, &permission))
            .await;

        Ok(permission.into())
    }

    async fn get_permission(&self, id: &str) -> AppResult<PermissionResponse> {
        let id = parse_id(id, "permission")?;
        let permission = self
            .permissions
            .find_by_id(id)
            .await?
            .ok_or_not_found("permission")?;
        Ok(permission.into())
    }

    async fn list_permissions(&self) -> AppResult<Vec<PermissionResponse>> {
        let permissions = self.permissions.find_all().await?;
        Ok(permissions.into_iter().map(PermissionResponse::from).collect())
    }

    async fn update_permission(
        &self,
        id: &str,
        request: UpdatePermission,
    ) -> AppResult<PermissionResponse> {
        let id = parse_id(id, "permission")?;
        request.validate()?;

        let mut permission = self
            .permissions
            .find_by_id(id)
            .await?
            .ok_or_not_found("permission")?;

        if let Some(module_name) = request.module_name.as_deref() {
            if module_name != permission.module_name {
                let existing = self
                    .permissions
                    .find_by_role_and_module(permission.role_id, module_name)
                    .await?;
                if existing.is_some_and(|p| p.id != permission.id) {
                    return Err(AppError::conflict(format!(
                        "permission for module '{}' already exists for this role",
                        module_name
                    )));
                }
            }
        }

        permission.apply(request);
        let permission = self.permissions.update(permission).await?;
        info!(permission_id = %permission.id, "Permission updated");

        self.events
            .emit(Self::event(PERMISSION_UPDATED, &permission))
            .await;

        Ok(permission.into())
    }

    async fn delete_permission(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "permission")?;
        self.permissions
            .find_by_id(id)
            .await?
            .ok_or_not_found("permission")?;

        self.permissions.delete(id).await?;
        info!(permission_id = %id, "Permission deleted");

        self.events
            .emit(DomainEvent::new(PERMISSION_DELETED).with("permission_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn list_for_role(&self, role_id: &str) -> AppResult<Vec<PermissionResponse>> {
        let role_id = parse_id(role_id, "role")?;
        self.ensure_role(role_id).await?;

        let permissions = self.permissions.find_by_role(role_id).await?;
        Ok(permissions.into_iter().map(PermissionResponse::from).collect())
    }

    async fn revoke_for_role(&self, role_id: &str) -> AppResult<u64> {
        let role_id = parse_id(role_id, "role")?;
        self.ensure_role(role_id).await?;

        let removed = self.permissions.delete_by_role(role_id).await?;
        info!(role_id = %role_id, removed, "Permissions revoked");

        self.events
            .emit(
                DomainEvent::new(PERMISSIONS_REVOKED)
                    .with("role_id", role_id.to_string())
                    .with("count", removed),
            )
            .await;

        Ok(removed)
    }
}
