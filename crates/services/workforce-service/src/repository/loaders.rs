//! Relation loaders.
//!
//! Stores read rows without joins and then resolve referenced records in one
//! batched `IN (...)` query per relation. A reference to a row that no longer
//! exists is left unresolved.

use std::collections::{HashMap, HashSet};

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use domain::{CrewMember, Role, User};

use super::entities::{crew_member, role, workforce_user};

fn distinct(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    ids.into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

async fn roles_by_id(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Role>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = role::Entity::find()
        .filter(role::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(models.into_iter().map(|m| (m.id, Role::from(m))).collect())
}

async fn users_by_id(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, User>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = workforce_user::Entity::find()
        .filter(workforce_user::Column::Id.is_in(ids))
        .all(db)
        .await?;

    models
        .into_iter()
        .map(|m| User::try_from(m).map(|user| (user.id, user)))
        .collect()
}

/// Resolve the role referenced by each item.
pub(crate) async fn attach_roles<T, K, S>(
    db: &DatabaseConnection,
    mut items: Vec<T>,
    key: K,
    set: S,
) -> Result<Vec<T>, DbErr>
where
    T: Send,
    K: Fn(&T) -> Option<Uuid> + Send + Sync,
    S: Fn(&mut T, Role) + Send + Sync,
{
    let roles = roles_by_id(db, distinct(items.iter().filter_map(&key))).await?;
    for item in items.iter_mut() {
        if let Some(role) = key(item).and_then(|id| roles.get(&id)) {
            set(item, role.clone());
        }
    }
    Ok(items)
}

/// Resolve the user referenced by each item.
pub(crate) async fn attach_users<T, K, S>(
    db: &DatabaseConnection,
    mut items: Vec<T>,
    key: K,
    set: S,
) -> Result<Vec<T>, DbErr>
where
    T: Send,
    K: Fn(&T) -> Option<Uuid> + Send + Sync,
    S: Fn(&mut T, User) + Send + Sync,
{
    let users = users_by_id(db, distinct(items.iter().filter_map(&key))).await?;
    for item in items.iter_mut() {
        if let Some(user) = key(item).and_then(|id| users.get(&id)) {
            set(item, user.clone());
        }
    }
    Ok(items)
}

/// Resolve the user behind each crew membership.
pub(crate) async fn attach_member_users(
    db: &DatabaseConnection,
    members: Vec<CrewMember>,
) -> Result<Vec<CrewMember>, DbErr> {
    attach_users(
        db,
        members,
        |m: &CrewMember| Some(m.user_id),
        |m, user| m.user = Some(user),
    )
    .await
}

/// Load the memberships of each crew, grouped by crew id, oldest first.
pub(crate) async fn members_by_crew(
    db: &DatabaseConnection,
    crew_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<CrewMember>>, DbErr> {
    if crew_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = crew_member::Entity::find()
        .filter(crew_member::Column::CrewId.is_in(crew_ids))
        .order_by_asc(crew_member::Column::CreatedAt)
        .all(db)
        .await?;
    let members = attach_member_users(db, models.into_iter().map(CrewMember::from).collect())
        .await?;

    let mut grouped: HashMap<Uuid, Vec<CrewMember>> = HashMap::new();
    for member in members {
        grouped.entry(member.crew_id).or_default().push(member);
    }
    Ok(grouped)
}
