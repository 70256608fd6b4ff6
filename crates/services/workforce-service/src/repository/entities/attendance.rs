//! Attendance database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Attendance;

use super::parse_column;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in: Option<DateTimeUtc>,
    pub check_out: Option<DateTimeUtc>,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Attendance {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Attendance {
            id: model.id,
            user_id: model.user_id,
            check_in: model.check_in,
            check_out: model.check_out,
            status: parse_column("status", &model.status)?,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user: None,
        })
    }
}

impl From<&Attendance> for ActiveModel {
    fn from(attendance: &Attendance) -> Self {
        ActiveModel {
            id: Set(attendance.id),
            user_id: Set(attendance.user_id),
            check_in: Set(attendance.check_in),
            check_out: Set(attendance.check_out),
            status: Set(attendance.status.to_string()),
            created_by: Set(attendance.created_by),
            created_at: Set(attendance.created_at),
            updated_at: Set(attendance.updated_at),
        }
    }
}
