//! Permission database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Permission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub role_id: Uuid,
    pub module_name: String,
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Permission {
    fn from(model: Model) -> Self {
        Permission {
            id: model.id,
            role_id: model.role_id,
            module_name: model.module_name,
            can_create: model.can_create,
            can_read: model.can_read,
            can_update: model.can_update,
            can_delete: model.can_delete,
            created_at: model.created_at,
            updated_at: model.updated_at,
            role: None,
        }
    }
}

impl From<&Permission> for ActiveModel {
    fn from(permission: &Permission) -> Self {
        ActiveModel {
            id: Set(permission.id),
            role_id: Set(permission.role_id),
            module_name: Set(permission.module_name.clone()),
            can_create: Set(permission.can_create),
            can_read: Set(permission.can_read),
            can_update: Set(permission.can_update),
            can_delete: Set(permission.can_delete),
            created_at: Set(permission.created_at),
            updated_at: Set(permission.updated_at),
        }
    }
}
