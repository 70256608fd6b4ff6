//! Trip service - Handles field trip logs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreateTrip, DomainEvent, Trip, TripResponse, UpdateTrip, TRIP_CREATED, TRIP_DELETED,
    TRIP_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{TripRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trip service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TripService: Send + Sync {
    async fn create_trip(&self, request: CreateTrip) -> AppResult<TripResponse>;

    async fn get_trip(&self, id: &str) -> AppResult<TripResponse>;

    async fn list_trips(&self) -> AppResult<Vec<TripResponse>>;

    async fn update_trip(&self, id: &str, request: UpdateTrip) -> AppResult<TripResponse>;

    async fn delete_trip(&self, id: &str) -> AppResult<()>;

    /// A user's trips, latest start first
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<TripResponse>>;

    /// A user's trips starting within `[from, to]`
    async fn list_for_user_between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<TripResponse>>;
}

/// Concrete implementation of TripService.
pub struct TripManager {
    trips: Arc<dyn TripRepository>,
    users: Arc<dyn UserRepository>,
    events: EventEmitter,
}

impl TripManager {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        users: Arc<dyn UserRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            trips,
            users,
            events,
        }
    }

    async fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("user")
            .map(|_| ())
    }

    fn event(event_type: &str, trip: &Trip) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("trip_id", trip.id.to_string())
            .with("user_id", trip.user_id.to_string())
            .with("completed", trip.is_completed())
    }
}

#[async_trait]
impl TripService for TripManager {
    async fn create_trip(&self, request: CreateTrip) -> AppResult<TripResponse> {
        request.validate()?;
        let trip = Trip::new(request)?;
        self.ensure_user(trip.user_id).await?;

        let trip = self.trips.create(trip).await?;
        info!(trip_id = %trip.id, user_id = %trip.user_id, "Trip logged");

        self.events.emit(Self::event(TRIP_CREATED, &trip)).await;

        Ok(trip.into())
    }

    async fn get_trip(&self, id: &str) -> AppResult<TripResponse> {
        let id = parse_id(id, "trip")?;
        let trip = self.trips.find_by_id(id).await?.ok_or_not_found("trip")?;
        Ok(trip.into())
    }

    async fn list_trips(&self) -> AppResult<Vec<TripResponse>> {
        let trips = self.trips.find_all().await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }

    async fn update_trip(&self, id: &str, request: UpdateTrip) -> AppResult<TripResponse> {
        let id = parse_id(id, "trip")?;
        request.validate()?;

        let mut trip = self.trips.find_by_id(id).await?.ok_or_not_found("trip")?;
        trip.apply(request)?;

        let trip = self.trips.update(trip).await?;
        info!(trip_id = %trip.id, completed = trip.is_completed(), "Trip updated");

        self.events.emit(Self::event(TRIP_UPDATED, &trip)).await;

        Ok(trip.into())
    }

    async fn delete_trip(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "trip")?;
        self.trips.find_by_id(id).await?.ok_or_not_found("trip")?;

        self.trips.delete(id).await?;
        info!(trip_id = %id, "Trip deleted");

        self.events
            .emit(DomainEvent::new(TRIP_DELETED).with("trip_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<TripResponse>> {
        let user_id = parse_id(user_id, "user")?;
        self.ensure_user(user_id).await?;

        let trips = self.trips.find_by_user(user_id).await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }

    async fn list_for_user_between(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<TripResponse>> {
        let user_id = parse_id(user_id, "user")?;
        if from > to {
            return Err(AppError::invalid_argument("from must not be after to"));
        }

        let trips = self.trips.find_by_user_between(user_id, from, to).await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }
}
