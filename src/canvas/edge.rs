use serde::{Deserialize, Serialize};

use crate::identity::EntityId;

/// Arrow marker drawn at the target end of an edge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EdgeMarker {
    #[default]
    ArrowClosed,
}

/// Rendering style of the edge path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EdgeKind {
    #[default]
    Smoothstep,
}

/// Directed parent→child connection between two canvas nodes.
///
/// A node has at most one incoming edge: the graph is a forest, not a
/// general DAG.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasEdge {
    pub id: String,
    /// Parent node id.
    pub source: EntityId,
    /// Child node id.
    pub target: EntityId,
    #[serde(default)]
    pub kind: EdgeKind,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub marker_end: EdgeMarker,
}

impl CanvasEdge {
    /// create a parent→child edge with the derived id
    pub fn between(
        source: EntityId,
        target: EntityId,
    ) -> Self {
        Self {
            id: Self::derive_id(&source, &target),
            source,
            target,
            kind: EdgeKind::default(),
            animated: false,
            marker_end: EdgeMarker::default(),
        }
    }

    pub(crate) fn derive_id(
        source: &EntityId,
        target: &EntityId,
    ) -> String {
        format!("e{}-{}", source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_derives_id_and_marker() {
        let edge = CanvasEdge::between(EntityId::from("start"), EntityId::from("child"));
        assert_eq!(edge.id, "estart-child");
        assert_eq!(edge.marker_end, EdgeMarker::ArrowClosed);
        assert_eq!(edge.kind, EdgeKind::Smoothstep);
        assert!(!edge.animated);
    }
}
