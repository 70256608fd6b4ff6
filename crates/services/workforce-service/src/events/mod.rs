//! Domain event publishing.
//!
//! Services announce every successful state change through an
//! [`EventEmitter`]. Delivery is best effort: a failed publish is logged and
//! never fails the operation that produced the event.

mod publisher;
mod redis_publisher;

pub use self::publisher::{EventEmitter, EventPublisher, PublishError};
pub use self::redis_publisher::RedisEventPublisher;

#[cfg(any(test, feature = "test-utils"))]
pub use self::publisher::MockEventPublisher;
