//! Permission domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_MODULE_NAME_LENGTH;
use crate::role::{Role, RoleResponse};

/// CRUD capability flags a role holds for one module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub role_id: Uuid,
    pub module_name: String,
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Referenced role, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Permission {
    pub fn new(request: CreatePermission) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            role_id: request.role_id,
            module_name: request.module_name,
            can_create: request.can_create,
            can_read: request.can_read,
            can_update: request.can_update,
            can_delete: request.can_delete,
            created_at: now,
            updated_at: now,
            role: None,
        }
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdatePermission) {
        if let Some(module_name) = update.module_name {
            self.module_name = module_name;
        }
        if let Some(flag) = update.can_create {
            self.can_create = flag;
        }
        if let Some(flag) = update.can_read {
            self.can_read = flag;
        }
        if let Some(flag) = update.can_update {
            self.can_update = flag;
        }
        if let Some(flag) = update.can_delete {
            self.can_delete = flag;
        }
        self.updated_at = Utc::now();
    }
}

/// Permission creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePermission {
    pub role_id: Uuid,
    /// Name of the application module the flags apply to
    #[validate(length(
        min = 1,
        max = MAX_MODULE_NAME_LENGTH,
        message = "module_name must be 1-50 characters"
    ))]
    pub module_name: String,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub can_update: bool,
    #[serde(default)]
    pub can_delete: bool,
}

/// Permission update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdatePermission {
    #[validate(length(
        min = 1,
        max = MAX_MODULE_NAME_LENGTH,
        message = "module_name must be 1-50 characters"
    ))]
    pub module_name: Option<String>,
    pub can_create: Option<bool>,
    pub can_read: Option<bool>,
    pub can_update: Option<bool>,
    pub can_delete: Option<bool>,
}

/// Permission response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PermissionResponse {
    pub id: Uuid,
    pub role_id: Uuid,
    pub module_name: String,
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleResponse>,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id,
            role_id: permission.role_id,
            module_name: permission.module_name,
            can_create: permission.can_create,
            can_read: permission.can_read,
            can_update: permission.can_update,
            can_delete: permission.can_delete,
            created_at: permission.created_at,
            updated_at: permission.updated_at,
            role: permission.role.map(RoleResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_to_false() {
        let request: CreatePermission = serde_json::from_str(
            r#"{"role_id":"6f1c1b8e-3f7a-4a53-9d3e-2b1a0c9d8e7f","module_name":"trips"}"#,
        )
        .unwrap();
        let permission = Permission::new(request);

        assert!(!permission.can_create);
        assert!(!permission.can_read);
        assert!(!permission.can_update);
        assert!(!permission.can_delete);
        assert!(permission.role.is_none());
    }

    #[test]
    fn test_apply_toggles_single_flag() {
        let mut permission = Permission::new(CreatePermission {
            role_id: Uuid::new_v4(),
            module_name: "crews".to_string(),
            can_create: true,
            can_read: true,
            can_update: false,
            can_delete: false,
        });
        permission.apply(UpdatePermission {
            can_delete: Some(true),
            ..Default::default()
        });

        assert!(permission.can_create);
        assert!(permission.can_delete);
        assert_eq!(permission.module_name, "crews");
    }
}
