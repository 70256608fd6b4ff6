//! Crew membership database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::CrewMember;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crew_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub crew_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CrewMember {
    fn from(model: Model) -> Self {
        CrewMember {
            id: model.id,
            crew_id: model.crew_id,
            user_id: model.user_id,
            created_at: model.created_at,
            user: None,
        }
    }
}

impl From<&CrewMember> for ActiveModel {
    fn from(member: &CrewMember) -> Self {
        ActiveModel {
            id: Set(member.id),
            crew_id: Set(member.crew_id),
            user_id: Set(member.user_id),
            created_at: Set(member.created_at),
        }
    }
}
