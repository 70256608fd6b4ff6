//! Trip domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_LOCATION_LENGTH;
use crate::error::{DomainError, DomainResult};
use crate::user::{User, UserResponse};

/// Business trip taken by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_location: String,
    pub end_location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub purpose: String,
    pub distance_km: Option<f64>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Travelling user, populated on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Trip {
    pub fn new(request: CreateTrip) -> DomainResult<Self> {
        let now = Utc::now();
        let trip = Self {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            start_location: request.start_location,
            end_location: request.end_location,
            start_time: request.start_time,
            end_time: request.end_time,
            purpose: request.purpose,
            distance_km: request.distance_km,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            user: None,
        };
        trip.check()?;
        Ok(trip)
    }

    /// Apply a partial update; absent fields are left unchanged
    pub fn apply(&mut self, update: UpdateTrip) -> DomainResult<()> {
        if let Some(start_location) = update.start_location {
            self.start_location = start_location;
        }
        if let Some(end_location) = update.end_location {
            self.end_location = end_location;
        }
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        if let Some(purpose) = update.purpose {
            self.purpose = purpose;
        }
        if let Some(distance_km) = update.distance_km {
            self.distance_km = distance_km;
        }
        self.check()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Check whether the trip has finished
    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    fn check(&self) -> DomainResult<()> {
        if let Some(distance) = self.distance_km {
            if !distance.is_finite() || distance < 0.0 {
                return Err(DomainError::validation("distance_km must be non-negative"));
            }
        }
        if let Some(end_time) = self.end_time {
            if end_time < self.start_time {
                return Err(DomainError::validation(
                    "end_time must not be before start_time",
                ));
            }
        }
        Ok(())
    }
}

/// Trip creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateTrip {
    pub user_id: Uuid,
    #[validate(length(
        min = 1,
        max = MAX_LOCATION_LENGTH,
        message = "start_location must be 1-255 characters"
    ))]
    pub start_location: String,
    #[validate(length(
        min = 1,
        max = MAX_LOCATION_LENGTH,
        message = "end_location must be 1-255 characters"
    ))]
    pub end_location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub purpose: String,
    pub distance_km: Option<f64>,
    pub created_by: Option<Uuid>,
}

/// Trip update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateTrip {
    #[validate(length(
        min = 1,
        max = MAX_LOCATION_LENGTH,
        message = "start_location must be 1-255 characters"
    ))]
    pub start_location: Option<String>,
    #[validate(length(
        min = 1,
        max = MAX_LOCATION_LENGTH,
        message = "end_location must be 1-255 characters"
    ))]
    pub end_location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub distance_km: Option<Option<f64>>,
}

/// Trip response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TripResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_location: String,
    pub end_location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub purpose: String,
    pub distance_km: Option<f64>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            user_id: trip.user_id,
            start_location: trip.start_location,
            end_location: trip.end_location,
            start_time: trip.start_time,
            end_time: trip.end_time,
            purpose: trip.purpose,
            distance_km: trip.distance_km,
            created_by: trip.created_by,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
            user: trip.user.map(UserResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn request() -> CreateTrip {
        CreateTrip {
            user_id: Uuid::new_v4(),
            start_location: "Depot".to_string(),
            end_location: "Substation 4".to_string(),
            start_time: Utc::now(),
            end_time: None,
            purpose: "inspection".to_string(),
            distance_km: Some(12.5),
            created_by: None,
        }
    }

    #[test]
    fn test_open_trip() {
        let trip = Trip::new(request()).unwrap();
        assert!(!trip.is_completed());
    }

    #[test]
    fn test_zero_distance_allowed() {
        let mut req = request();
        req.distance_km = Some(0.0);
        assert!(Trip::new(req).is_ok());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let mut req = request();
        req.distance_km = Some(-1.0);
        assert!(matches!(Trip::new(req), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut req = request();
        req.end_time = Some(req.start_time - Duration::minutes(5));
        assert!(Trip::new(req).is_err());
    }

    #[test]
    fn test_apply_closes_trip() {
        let mut trip = Trip::new(request()).unwrap();
        let end = trip.start_time + Duration::hours(2);
        trip.apply(UpdateTrip {
            end_time: Some(Some(end)),
            ..Default::default()
        })
        .unwrap();

        assert!(trip.is_completed());
        assert_eq!(trip.distance_km, Some(12.5));
    }
}
