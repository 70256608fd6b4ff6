//! Redis pub/sub event publisher.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::debug;

use common::EventBusConfig;
use domain::DomainEvent;

use super::publisher::{EventPublisher, PublishError};

/// Publishes each event as JSON on channel `<prefix>.<EventType>`.
#[derive(Clone)]
pub struct RedisEventPublisher {
    connection: ConnectionManager,
    config: EventBusConfig,
}

impl RedisEventPublisher {
    /// Connect to the broker at `url`.
    pub async fn connect(url: &str, config: EventBusConfig) -> Result<Self, PublishError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!(topic_prefix = %config.topic_prefix, "Event bus connected");

        Ok(Self { connection, config })
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        let channel = self.config.channel(&event.event_type);
        let message = serde_json::to_string(event)?;

        let mut conn = self.connection.clone();
        let receivers: i64 = conn.publish(&channel, message).await?;

        debug!(channel = %channel, receivers, "Published event");
        Ok(())
    }

    async fn ping(&self) -> Result<(), PublishError> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
