//! Equipment domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{
    MAX_EQUIPMENT_NAME_LENGTH, MAX_SERIAL_NUMBER_LENGTH,
    EQUIPMENT_STATUS_ACTIVE, EQUIPMENT_STATUS_INACTIVE, EQUIPMENT_STATUS_UNDER_MAINTENANCE,
};
use crate::error::DomainError;
use crate::user::{User, UserResponse};

/// Operational status of an equipment item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EquipmentStatus {
    #[default]
    Active,
    Inactive,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => EQUIPMENT_STATUS_ACTIVE,
            EquipmentStatus::Inactive => EQUIPMENT_STATUS_INACTIVE,
            EquipmentStatus::UnderMaintenance => EQUIPMENT_STATUS_UNDER_MAINTENANCE,
        }
    }
}

impl FromStr for EquipmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EQUIPMENT_STATUS_ACTIVE => Ok(EquipmentStatus::Active),
            EQUIPMENT_STATUS_INACTIVE => Ok(EquipmentStatus::Inactive),
            EQUIPMENT_STATUS_UNDER_MAINTENANCE => Ok(EquipmentStatus::UnderMaintenance),
            other => Err(DomainError::unknown_value("equipment status", other)),
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracked physical asset, optionally assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    /// Unique when present
    pub serial_number: Option<String>,
    pub assigned_to_user: Option<Uuid>,
    pub status: EquipmentStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Assigned user, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<User>,
}

impl Equipment {
    /// Create a new equipment item, defaulting status to Active
    pub fn new(request: CreateEquipment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            serial_number: non_blank(request.serial_number),
            assigned_to_user: request.assigned_to_user,
            status: request.status.unwrap_or_default(),
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            assigned_user: None,
        }
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdateEquipment) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(serial_number) = update.serial_number {
            self.serial_number = non_blank(serial_number);
        }
        if let Some(assigned_to_user) = update.assigned_to_user {
            if self.assigned_to_user != assigned_to_user {
                self.assigned_user = None;
            }
            self.assigned_to_user = assigned_to_user;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// A blank serial number is stored as no serial number.
fn non_blank(serial_number: Option<String>) -> Option<String> {
    serial_number.filter(|s| !s.trim().is_empty())
}

/// Equipment creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEquipment {
    #[validate(length(
        min = 1,
        max = MAX_EQUIPMENT_NAME_LENGTH,
        message = "name must be 1-100 characters"
    ))]
    pub name: String,
    #[validate(length(
        max = MAX_SERIAL_NUMBER_LENGTH,
        message = "serial_number must be at most 50 characters"
    ))]
    pub serial_number: Option<String>,
    pub assigned_to_user: Option<Uuid>,
    /// Defaults to Active
    pub status: Option<EquipmentStatus>,
    pub created_by: Option<Uuid>,
}

/// Equipment update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateEquipment {
    #[validate(length(
        min = 1,
        max = MAX_EQUIPMENT_NAME_LENGTH,
        message = "name must be 1-100 characters"
    ))]
    pub name: Option<String>,
    /// `null` clears the serial number
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub serial_number: Option<Option<String>>,
    /// `null` unassigns the equipment
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Uuid))]
    pub assigned_to_user: Option<Option<Uuid>>,
    pub status: Option<EquipmentStatus>,
}

impl CreateEquipment {
    /// Serial number to store, ignoring a blank value
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref().filter(|s| !s.trim().is_empty())
    }
}

impl UpdateEquipment {
    /// New serial number when the update sets a non-blank one
    pub fn new_serial_number(&self) -> Option<&str> {
        self.serial_number
            .as_ref()
            .and_then(|s| s.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// New assignee when the update sets one
    pub fn new_assignee(&self) -> Option<Uuid> {
        self.assigned_to_user.flatten()
    }
}

/// Equipment response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EquipmentResponse {
    pub id: Uuid,
    pub name: String,
    pub serial_number: Option<String>,
    pub assigned_to_user: Option<Uuid>,
    pub status: EquipmentStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<UserResponse>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id,
            name: equipment.name,
            serial_number: equipment.serial_number,
            assigned_to_user: equipment.assigned_to_user,
            status: equipment.status,
            created_by: equipment.created_by,
            created_at: equipment.created_at,
            updated_at: equipment.updated_at,
            assigned_user: equipment.assigned_user.map(UserResponse::from),
        }
    }
}
