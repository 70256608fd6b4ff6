//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{
    MAX_EMAIL_LENGTH, MAX_EMPLOYEE_ID_LENGTH, MAX_PERSON_NAME_LENGTH, MAX_PHONE_LENGTH,
    USER_PROFILE_ADMINISTRATOR, USER_PROFILE_FIELD_AGENT, USER_PROFILE_MANAGER,
    USER_STATUS_ACTIVE, USER_STATUS_INACTIVE,
};
use crate::error::DomainError;
use crate::role::{Role, RoleResponse};

/// Employment status of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => USER_STATUS_ACTIVE,
            UserStatus::Inactive => USER_STATUS_INACTIVE,
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            USER_STATUS_ACTIVE => Ok(UserStatus::Active),
            USER_STATUS_INACTIVE => Ok(UserStatus::Inactive),
            other => Err(DomainError::unknown_value("user status", other)),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job profile of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserProfile {
    #[default]
    #[serde(rename = "Field Agent")]
    FieldAgent,
    Manager,
    Administrator,
}

impl UserProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserProfile::FieldAgent => USER_PROFILE_FIELD_AGENT,
            UserProfile::Manager => USER_PROFILE_MANAGER,
            UserProfile::Administrator => USER_PROFILE_ADMINISTRATOR,
        }
    }
}

impl FromStr for UserProfile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            USER_PROFILE_FIELD_AGENT => Ok(UserProfile::FieldAgent),
            USER_PROFILE_MANAGER => Ok(UserProfile::Manager),
            USER_PROFILE_ADMINISTRATOR => Ok(UserProfile::Administrator),
            other => Err(DomainError::unknown_value("user profile", other)),
        }
    }
}

impl std::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workforce member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique employee identifier
    pub employee_id: String,
    /// Unique email address
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub profile: UserProfile,
    pub role_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Referenced role, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl User {
    /// Create a new user, defaulting status to Active and profile to Field Agent
    pub fn new(request: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            employee_id: request.employee_id,
            email: request.email,
            phone: request.phone,
            status: request.status.unwrap_or_default(),
            profile: request.profile.unwrap_or_default(),
            role_id: request.role_id,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            role: None,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(employee_id) = update.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(profile) = update.profile {
            self.profile = profile;
        }
        if let Some(role_id) = update.role_id {
            if self.role_id != role_id {
                self.role = None;
            }
            self.role_id = role_id;
        }
        self.updated_at = Utc::now();
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateUser {
    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "first_name must be 1-50 characters"
    ))]
    pub first_name: String,
    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "last_name must be 1-50 characters"
    ))]
    pub last_name: String,
    #[validate(length(
        min = 1,
        max = MAX_EMPLOYEE_ID_LENGTH,
        message = "employee_id must be 1-20 characters"
    ))]
    pub employee_id: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = MAX_EMAIL_LENGTH, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = MAX_PHONE_LENGTH, message = "phone must be at most 20 characters"))]
    pub phone: String,
    /// Defaults to Active
    pub status: Option<UserStatus>,
    /// Defaults to Field Agent
    pub profile: Option<UserProfile>,
    pub role_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
}

/// User update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUser {
    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "first_name must be 1-50 characters"
    ))]
    pub first_name: Option<String>,
    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "last_name must be 1-50 characters"
    ))]
    pub last_name: Option<String>,
    #[validate(length(
        min = 1,
        max = MAX_EMPLOYEE_ID_LENGTH,
        message = "employee_id must be 1-20 characters"
    ))]
    pub employee_id: Option<String>,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = MAX_EMAIL_LENGTH, message = "email must be at most 100 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = MAX_PHONE_LENGTH, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub status: Option<UserStatus>,
    pub profile: Option<UserProfile>,
    /// `null` unassigns the role
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Uuid))]
    pub role_id: Option<Option<Uuid>>,
}

/// User response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub employee_id: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub profile: UserProfile,
    pub role_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            employee_id: user.employee_id,
            email: user.email,
            phone: user.phone,
            status: user.status,
            profile: user.profile,
            role_id: user.role_id,
            created_by: user.created_by,
            created_at: user.created_at,
            updated_at: user.updated_at,
            role: user.role.map(RoleResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateUser {
        CreateUser {
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            employee_id: "EMP-001".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            status: None,
            profile: None,
            role_id: None,
            created_by: None,
        }
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(create_request());

        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.profile, UserProfile::FieldAgent);
        assert_eq!(user.full_name(), "Ada Okafor");
    }

    #[test]
    fn test_profile_serializes_as_display_string() {
        let json = serde_json::to_string(&UserProfile::FieldAgent).unwrap();
        assert_eq!(json, "\"Field Agent\"");
        assert_eq!("Manager".parse::<UserProfile>().unwrap(), UserProfile::Manager);
        assert!("Boss".parse::<UserProfile>().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut request = create_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_apply_clears_role() {
        let mut request = create_request();
        request.role_id = Some(Uuid::new_v4());
        let mut user = User::new(request);

        let update: UpdateUser = serde_json::from_str(r#"{"role_id": null}"#).unwrap();
        user.apply(update);

        assert_eq!(user.role_id, None);
        assert_eq!(user.first_name, "Ada");
    }
}
