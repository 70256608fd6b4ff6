//! SeaORM entities, one per table.

pub mod attendance;
pub mod crew;
pub mod crew_member;
pub mod equipment;
pub mod permission;
pub mod role;
pub mod time_off;
pub mod trip;
pub mod workforce_user;

use sea_orm::DbErr;

/// Parse an enumerated column stored as its display string.
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DbErr>
where
    T: std::str::FromStr,
{
    value
        .parse()
        .map_err(|_| DbErr::Type(format!("invalid {} value '{}'", column, value)))
}
