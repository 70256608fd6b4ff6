//! Workforce user database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::User;

use super::parse_column;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workforce_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub employee_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub status: String,
    pub profile: String,
    pub role_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            employee_id: model.employee_id,
            email: model.email,
            phone: model.phone,
            status: parse_column("status", &model.status)?,
            profile: parse_column("profile", &model.profile)?,
            role_id: model.role_id,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            role: None,
        })
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            employee_id: Set(user.employee_id.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            status: Set(user.status.to_string()),
            profile: Set(user.profile.to_string()),
            role_id: Set(user.role_id),
            created_by: Set(user.created_by),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}
