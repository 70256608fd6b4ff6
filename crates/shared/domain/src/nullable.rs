//! Serde support for partial updates of nullable fields.
//!
//! A field typed `Option<Option<T>>` and annotated with
//! `#[serde(default, deserialize_with = "crate::nullable::deserialize")]`
//! distinguishes three request states:
//!
//! - field absent: `None` (leave unchanged)
//! - field `null`: `Some(None)` (clear the value)
//! - field set: `Some(Some(value))`

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize")]
        value: Option<Option<u32>>,
    }

    #[test]
    fn test_absent_field_is_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.value, None);
    }

    #[test]
    fn test_null_field_clears() {
        let patch: Patch = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(patch.value, Some(None));
    }

    #[test]
    fn test_present_field_sets() {
        let patch: Patch = serde_json::from_str(r#"{"value": 7}"#).unwrap();
        assert_eq!(patch.value, Some(Some(7)));
    }
}
