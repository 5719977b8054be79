use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{identity::EntityId, model::EventCategory};

/// Position of a node on the canvas, in editor pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Typed properties attached to a canvas node.
///
/// Everything the reconstructor needs to rebuild an event lives here, so a
/// single node round-trips without consulting the rest of the tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeProperties {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub category: EventCategory,
    /// Stored parent reference; edges are authoritative, this is the
    /// fallback for nodes not yet connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    /// Ordered ids of attached actions, resolved against the canvas
    /// workflow's flat action list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_ids: Vec<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Graph representation of one event on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasNode {
    pub id: EntityId,
    /// Node discriminator mirrored from the event type ("start",
    /// "page_view", "action", ...).
    pub kind: String,
    pub position: Position,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: NodeProperties,
}
