//! HTTP handlers, one module per entity family.

pub mod attendance_handler;
pub mod crew_handler;
pub mod equipment_handler;
pub mod health_handler;
pub mod permission_handler;
pub mod role_handler;
pub mod time_off_handler;
pub mod trip_handler;
pub mod user_handler;

pub use attendance_handler::attendance_routes;
pub use crew_handler::crew_routes;
pub use equipment_handler::equipment_routes;
pub use health_handler::health_routes;
pub use permission_handler::permission_routes;
pub use role_handler::role_routes;
pub use time_off_handler::time_off_routes;
pub use trip_handler::trip_routes;
pub use user_handler::user_routes;

use common::{AppError, AppResult};

/// Resolve an optional `from`/`to` query pair; one bound without the other is rejected.
pub(crate) fn paired_range<T>(from: Option<T>, to: Option<T>) -> AppResult<Option<(T, T)>> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some((from, to))),
        (None, None) => Ok(None),
        _ => Err(AppError::invalid_argument(
            "from and to must be given together",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_range() {
        assert_eq!(paired_range(Some(1), Some(2)).unwrap(), Some((1, 2)));
        assert_eq!(paired_range::<i32>(None, None).unwrap(), None);
        assert!(paired_range(Some(1), None).is_err());
    }
}
