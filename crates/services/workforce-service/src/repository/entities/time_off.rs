//! Time-off database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::TimeOff;

use super::parse_column;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "time_off")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for TimeOff {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(TimeOff {
            id: model.id,
            user_id: model.user_id,
            leave_type: parse_column("leave_type", &model.leave_type)?,
            start_date: model.start_date,
            end_date: model.end_date,
            reason: model.reason,
            status: parse_column("status", &model.status)?,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user: None,
        })
    }
}

impl From<&TimeOff> for ActiveModel {
    fn from(time_off: &TimeOff) -> Self {
        ActiveModel {
            id: Set(time_off.id),
            user_id: Set(time_off.user_id),
            leave_type: Set(time_off.leave_type.to_string()),
            start_date: Set(time_off.start_date),
            end_date: Set(time_off.end_date),
            reason: Set(time_off.reason.clone()),
            status: Set(time_off.status.to_string()),
            created_by: Set(time_off.created_by),
            created_at: Set(time_off.created_at),
            updated_at: Set(time_off.updated_at),
        }
    }
}
