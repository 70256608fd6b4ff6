//! Workforce Service Library
//!
//! This crate provides workforce administration (roles, permissions, users,
//! crews, equipment, attendance, time off and trips) over a JSON HTTP API,
//! announcing every change on the event bus.

pub mod config;
pub mod events;
pub mod http;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::WorkforceConfig;
use crate::events::{EventEmitter, EventPublisher, RedisEventPublisher};
use crate::http::{create_router, AppState};
use crate::infra::Database;
use crate::service::Services;

/// Run the HTTP server, overriding the configured bind address.
pub async fn run_server(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = WorkforceConfig::from_env();
    config.service.host = host.to_string();
    config.service.port = port;

    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = WorkforceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect the event publisher.
///
/// An unreachable broker is not fatal: the service runs without events.
pub async fn connect_publisher(config: &WorkforceConfig) -> Option<Arc<dyn EventPublisher>> {
    let Some(url) = config.event_bus_url() else {
        info!("Event bus not configured; events are disabled");
        return None;
    };

    match RedisEventPublisher::connect(url, config.events.clone()).await {
        Ok(publisher) => Some(Arc::new(publisher)),
        Err(e) => {
            warn!(error = %e, "Event bus unreachable; continuing without events");
            None
        }
    }
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(config: WorkforceConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(?config, "Starting {}", config.service.service_name);

    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Wire services
    let publisher = connect_publisher(&config).await;
    let events = EventEmitter::new(publisher.clone());
    let services = Services::from_connection(db.get_connection(), publisher);

    // Build router
    let state = AppState::new(services, db, events);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = config.service.bind_addr().parse()?;
    info!("Workforce service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
