//! Crew database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Crew;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub crew_name: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Crew {
    fn from(model: Model) -> Self {
        Crew {
            id: model.id,
            crew_name: model.crew_name,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            members: Vec::new(),
        }
    }
}

impl From<&Crew> for ActiveModel {
    fn from(crew: &Crew) -> Self {
        ActiveModel {
            id: Set(crew.id),
            crew_name: Set(crew.crew_name.clone()),
            created_by: Set(crew.created_by),
            created_at: Set(crew.created_at),
            updated_at: Set(crew.updated_at),
        }
    }
}
