//! Application state for dependency injection.

use crate::events::EventEmitter;
use crate::infra::Database;
use crate::service::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub db: Database,
    pub events: EventEmitter,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, db: Database, events: EventEmitter) -> Self {
        Self {
            services,
            db,
            events,
        }
    }
}
