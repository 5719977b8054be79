use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::{EntityId, slug};

/// Visual severity of a message popup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Info,
    Warning,
    Success,
    Error,
}

/// A reusable message template rendered by the tracking client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub message_type: MessageKind,
    /// How long the popup stays visible, in milliseconds.
    #[serde(default = "default_duration")]
    pub display_duration: u64,
    pub template_name: String,
    #[serde(default)]
    pub template_config: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_duration() -> u64 {
    5000
}

impl MessageModel {
    /// Compare template names via slugs so locally-typed and
    /// server-returned names compare equal. Fallback only; lookup is keyed
    /// by id whenever one is present.
    pub fn matches_name(
        &self,
        name: &str,
    ) -> bool {
        slug(&self.template_name) == slug(name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_matches_name_via_slug() {
        let message: MessageModel = serde_json::from_value(json!({
            "id": "1",
            "title": "Welcome",
            "template_name": "Welcome Campaign",
        }))
        .unwrap();

        assert!(message.matches_name("welcome_campaign"));
        assert!(message.matches_name("Welcome  Campaign"));
        assert!(!message.matches_name("product_announcement"));
    }

    #[test]
    fn test_defaults() {
        let message: MessageModel = serde_json::from_value(json!({
            "title": "Hi",
            "template_name": "welcome",
        }))
        .unwrap();

        assert_eq!(message.display_duration, 5000);
        assert_eq!(message.message_type, MessageKind::Info);
    }
}
