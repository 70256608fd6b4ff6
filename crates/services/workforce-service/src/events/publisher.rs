//! Event publisher port and the emitter services use.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use domain::DomainEvent;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Errors raised while delivering an event to the broker.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("event bus error: {0}")]
    Broker(#[from] ::redis::RedisError),
}

/// Outbound port for domain events.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Deliver one event
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError>;

    /// Check broker connectivity
    async fn ping(&self) -> Result<(), PublishError>;
}

/// Fire-and-forget wrapper around an optional publisher.
#[derive(Clone, Default)]
pub struct EventEmitter {
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl EventEmitter {
    pub fn new(publisher: Option<Arc<dyn EventPublisher>>) -> Self {
        Self { publisher }
    }

    /// Emitter that drops every event
    pub fn disabled() -> Self {
        Self { publisher: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.is_some()
    }

    /// Publish an event, logging instead of returning a failure.
    pub async fn emit(&self, event: DomainEvent) {
        let Some(publisher) = &self.publisher else {
            return;
        };

        match publisher.publish(&event).await {
            Ok(()) => debug!(event_type = %event.event_type, "Event published"),
            Err(e) => warn!(
                event_type = %event.event_type,
                error = %e,
                "Failed to publish event"
            ),
        }
    }

    /// Broker connectivity; `None` when events are disabled
    pub async fn ping(&self) -> Option<Result<(), PublishError>> {
        match &self.publisher {
            Some(publisher) => Some(publisher.ping().await),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::redis::{ErrorKind, RedisError};
    use domain::ROLE_CREATED;

    #[tokio::test]
    async fn test_emit_forwards_event() {
        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| event.event_type == ROLE_CREATED && event.field("role_id") == Some("r-1"))
            .times(1)
            .returning(|_| Ok(()));

        let emitter = EventEmitter::new(Some(Arc::new(publisher)));
        emitter
            .emit(DomainEvent::new(ROLE_CREATED).with("role_id", "r-1"))
            .await;
    }

    #[tokio::test]
    async fn test_emit_swallows_broker_failure() {
        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .returning(|_| Err(RedisError::from((ErrorKind::IoError, "down")).into()));

        let emitter = EventEmitter::new(Some(Arc::new(publisher)));
        emitter.emit(DomainEvent::new(ROLE_CREATED)).await;
    }

    #[tokio::test]
    async fn test_disabled_emitter_is_noop() {
        let emitter = EventEmitter::disabled();
        assert!(!emitter.is_enabled());
        assert!(emitter.ping().await.is_none());
        emitter.emit(DomainEvent::new(ROLE_CREATED)).await;
    }
}
