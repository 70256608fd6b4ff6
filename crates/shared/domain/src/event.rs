//! Domain events announced after successful state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event envelope `{type, payload, timestamp}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    /// Create an event stamped with the current time
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            payload: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add a payload field
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// Read a string payload field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROLE_CREATED;

    #[test]
    fn test_envelope_shape() {
        let event = DomainEvent::new(ROLE_CREATED)
            .with("role_id", "r-1")
            .with("role_name", "Manager");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "RoleCreated");
        assert_eq!(json["payload"]["role_id"], "r-1");
        assert!(json["timestamp"].is_string());
        assert_eq!(event.field("role_name"), Some("Manager"));
    }
}
