//! Crew and crew membership domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_CREW_NAME_LENGTH;
use crate::user::{User, UserResponse};

/// Named group of users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub id: Uuid,
    pub crew_name: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Memberships, populated on reads
    #[serde(default)]
    pub members: Vec<CrewMember>,
}

impl Crew {
    pub fn new(request: CreateCrew) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            crew_name: request.crew_name,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            members: Vec::new(),
        }
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdateCrew) {
        if let Some(crew_name) = update.crew_name {
            self.crew_name = crew_name;
        }
        self.updated_at = Utc::now();
    }

    /// Check whether a user is among the loaded members
    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|member| member.user_id == user_id)
    }
}

/// Association of one user with one crew
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: Uuid,
    pub crew_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Member user, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl CrewMember {
    pub fn new(crew_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            crew_id,
            user_id,
            created_at: Utc::now(),
            user: None,
        }
    }
}

/// Crew creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateCrew {
    #[validate(length(
        min = 1,
        max = MAX_CREW_NAME_LENGTH,
        message = "crew_name must be 1-100 characters"
    ))]
    pub crew_name: String,
    pub created_by: Option<Uuid>,
}

/// Crew update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCrew {
    #[validate(length(
        min = 1,
        max = MAX_CREW_NAME_LENGTH,
        message = "crew_name must be 1-100 characters"
    ))]
    pub crew_name: Option<String>,
}

/// Request body for adding a member to a crew
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddCrewMember {
    pub user_id: Uuid,
}

/// Crew member response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CrewMemberResponse {
    pub id: Uuid,
    pub crew_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<CrewMember> for CrewMemberResponse {
    fn from(member: CrewMember) -> Self {
        Self {
            id: member.id,
            crew_id: member.crew_id,
            user_id: member.user_id,
            created_at: member.created_at,
            user: member.user.map(UserResponse::from),
        }
    }
}

/// Crew response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CrewResponse {
    pub id: Uuid,
    pub crew_name: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub members: Vec<CrewMemberResponse>,
}

impl From<Crew> for CrewResponse {
    fn from(crew: Crew) -> Self {
        Self {
            id: crew.id,
            crew_name: crew.crew_name,
            created_by: crew.created_by,
            created_at: crew.created_at,
            updated_at: crew.updated_at,
            members: crew
                .members
                .into_iter()
                .map(CrewMemberResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_member() {
        let mut crew = Crew::new(CreateCrew {
            crew_name: "North Line".to_string(),
            created_by: None,
        });
        let user_id = Uuid::new_v4();
        crew.members.push(CrewMember::new(crew.id, user_id));

        assert!(crew.has_member(user_id));
        assert!(!crew.has_member(Uuid::new_v4()));
    }

    #[test]
    fn test_response_includes_members() {
        let mut crew = Crew::new(CreateCrew {
            crew_name: "Night Shift".to_string(),
            created_by: None,
        });
        crew.members.push(CrewMember::new(crew.id, Uuid::new_v4()));

        let response = CrewResponse::from(crew);
        assert_eq!(response.members.len(), 1);
        assert!(response.members[0].user.is_none());
    }
}
