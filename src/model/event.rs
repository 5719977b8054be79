use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{identity::EntityId, model::ActionModel};

/// Where a trigger event originates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventCategory {
    #[default]
    Web,
    Mobile,
}

/// A node in the workflow hierarchy: a trigger condition with child events
/// and attached actions.
///
/// `id` is `None` only in outgoing create payloads, where a client-local
/// placeholder has been stripped so the server can mint the canonical id.
/// `subordinates` is derived and never trusted from storage; run
/// [`set_subordinates`](crate::set_subordinates) after any structural change
/// before the tree is considered consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: EventCategory,
    /// Trigger tag, e.g. "page_view", "start".
    pub event_type: String,
    /// `None` marks a root event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    /// Child events, owned exclusively by this parent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EventModel>,
    /// Number of descendants in this subtree, excluding the event itself.
    #[serde(default)]
    pub subordinates: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EventModel {
    /// create a fresh, unpersisted event carrying a local placeholder id
    pub fn new(
        name: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(EntityId::generate_local()),
            name: name.into(),
            description: String::new(),
            category: EventCategory::default(),
            event_type: event_type.into(),
            parent_id: None,
            children: Vec::new(),
            subordinates: 0,
            actions: Vec::new(),
            position_x: None,
            position_y: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// depth-first search of this subtree for an event by id
    pub fn find(
        &self,
        id: &EntityId,
    ) -> Option<&EventModel> {
        if self.id.as_ref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// mutable depth-first search of this subtree for an event by id
    pub fn find_mut(
        &mut self,
        id: &EntityId,
    ) -> Option<&mut EventModel> {
        if self.id.as_ref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// detach and return the descendant subtree rooted at `id`
    pub fn remove_descendant(
        &mut self,
        id: &EntityId,
    ) -> Option<EventModel> {
        if let Some(pos) = self.children.iter().position(|c| c.id.as_ref() == Some(id)) {
            return Some(self.children.remove(pos));
        }
        self.children.iter_mut().find_map(|c| c.remove_descendant(id))
    }
}
