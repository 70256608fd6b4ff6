//! Role domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_DESCRIPTION_LENGTH, MAX_ROLE_NAME_LENGTH};

/// Named job role that users and permissions reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub role_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a new role with a fresh identifier
    pub fn new(role_name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            role_name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdateRole) {
        if let Some(role_name) = update.role_name {
            self.role_name = role_name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}

/// Role creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateRole {
    /// Unique role name
    #[validate(length(
        min = 1,
        max = MAX_ROLE_NAME_LENGTH,
        message = "role_name must be 1-50 characters"
    ))]
    pub role_name: String,
    #[serde(default)]
    #[validate(length(
        max = MAX_DESCRIPTION_LENGTH,
        message = "description must be at most 255 characters"
    ))]
    pub description: String,
}

/// Role update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateRole {
    #[validate(length(
        min = 1,
        max = MAX_ROLE_NAME_LENGTH,
        message = "role_name must be 1-50 characters"
    ))]
    pub role_name: Option<String>,
    #[validate(length(
        max = MAX_DESCRIPTION_LENGTH,
        message = "description must be at most 255 characters"
    ))]
    pub description: Option<String>,
}

/// Role response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleResponse {
    pub id: Uuid,
    pub role_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            role_name: role.role_name,
            description: role.description,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_length_limit() {
        let at_limit = CreateRole {
            role_name: "r".repeat(MAX_ROLE_NAME_LENGTH as usize),
            description: String::new(),
        };
        assert!(at_limit.validate().is_ok());

        let too_long = CreateRole {
            role_name: "r".repeat(MAX_ROLE_NAME_LENGTH as usize + 1),
            description: String::new(),
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role_name"));
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut role = Role::new("Technician".to_string(), "Field work".to_string());
        role.apply(UpdateRole {
            role_name: None,
            description: Some("Installs meters".to_string()),
        });

        assert_eq!(role.role_name, "Technician");
        assert_eq!(role.description, "Installs meters");
        assert!(role.updated_at >= role.created_at);
    }

    #[test]
    fn test_create_role_validation() {
        let empty = CreateRole {
            role_name: String::new(),
            description: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreateRole {
            role_name: "x".repeat(51),
            description: String::new(),
        };
        assert!(too_long.validate().is_err());

        let ok = CreateRole {
            role_name: "Manager".to_string(),
            description: String::new(),
        };
        assert!(ok.validate().is_ok());
    }
}
