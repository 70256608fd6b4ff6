//! Role database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub role_name: String,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Role {
    fn from(model: Model) -> Self {
        Role {
            id: model.id,
            role_name: model.role_name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Role> for ActiveModel {
    fn from(role: &Role) -> Self {
        ActiveModel {
            id: Set(role.id),
            role_name: Set(role.role_name.clone()),
            description: Set(role.description.clone()),
            created_at: Set(role.created_at),
            updated_at: Set(role.updated_at),
        }
    }
}
