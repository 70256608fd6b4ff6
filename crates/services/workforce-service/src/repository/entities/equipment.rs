//! Equipment database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Equipment;

use super::parse_column;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub serial_number: Option<String>,
    pub assigned_to_user: Option<Uuid>,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Equipment {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Equipment {
            id: model.id,
            name: model.name,
            serial_number: model.serial_number,
            assigned_to_user: model.assigned_to_user,
            status: parse_column("status", &model.status)?,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            assigned_user: None,
        })
    }
}

impl From<&Equipment> for ActiveModel {
    fn from(equipment: &Equipment) -> Self {
        ActiveModel {
            id: Set(equipment.id),
            name: Set(equipment.name.clone()),
            serial_number: Set(equipment.serial_number.clone()),
            assigned_to_user: Set(equipment.assigned_to_user),
            status: Set(equipment.status.to_string()),
            created_by: Set(equipment.created_by),
            created_at: Set(equipment.created_at),
            updated_at: Set(equipment.updated_at),
        }
    }
}
