use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{identity::EntityId, model::MessageModel};

/// Reference to a message template: either by id or embedded inline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageRef {
    Id(EntityId),
    Embedded(Box<MessageModel>),
}

/// An effect attached to an event, e.g. showing a message popup.
///
/// Owned by exactly one event in the tree; referenced by id from the
/// flattened action list used in the canvas representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub action_type: String,
    /// Opaque per-action configuration, passed through untouched.
    #[serde(default)]
    pub action_config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_message: Option<MessageRef>,
    #[serde(default)]
    pub delay_seconds: u64,
    #[serde(default)]
    pub is_active: bool,
    /// Scheduling window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub conversion_tracking: bool,
    /// Conversion attribution window in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ActionModel {
    /// create a fresh, unpersisted action carrying a local placeholder id
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::generate_local()),
            action_type: action_type.into(),
            action_config: Map::new(),
            web_message: None,
            delay_seconds: 0,
            is_active: true,
            start_date: None,
            end_date: None,
            conversion_tracking: false,
            conversion_time: None,
            revenue_property: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_ref_by_id() {
        let action: ActionModel = serde_json::from_value(json!({
            "id": "a1",
            "action_type": "show_message",
            "web_message": "550e8400-e29b-41d4-a716-446655440000",
        }))
        .unwrap();

        match action.web_message {
            Some(MessageRef::Id(id)) => assert!(id.is_persisted()),
            other => panic!("expected id reference, got {:?}", other),
        }
    }

    #[test]
    fn test_local_id_omitted_when_stripped() {
        let mut action = ActionModel::new("show_message");
        action.id = None;
        let value = serde_json::to_value(&action).unwrap();
        assert!(value.get("id").is_none());
    }
}
