//! Trip database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Trip;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_location: String,
    pub end_location: String,
    pub start_time: DateTimeUtc,
    pub end_time: Option<DateTimeUtc>,
    pub purpose: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub distance_km: Option<f64>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Trip {
    fn from(model: Model) -> Self {
        Trip {
            id: model.id,
            user_id: model.user_id,
            start_location: model.start_location,
            end_location: model.end_location,
            start_time: model.start_time,
            end_time: model.end_time,
            purpose: model.purpose,
            distance_km: model.distance_km,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user: None,
        }
    }
}

impl From<&Trip> for ActiveModel {
    fn from(trip: &Trip) -> Self {
        ActiveModel {
            id: Set(trip.id),
            user_id: Set(trip.user_id),
            start_location: Set(trip.start_location.clone()),
            end_location: Set(trip.end_location.clone()),
            start_time: Set(trip.start_time),
            end_time: Set(trip.end_time),
            purpose: Set(trip.purpose.clone()),
            distance_km: Set(trip.distance_km),
            created_by: Set(trip.created_by),
            created_at: Set(trip.created_at),
            updated_at: Set(trip.updated_at),
        }
    }
}
