use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    canvas::{CanvasEdge, CanvasNode},
    identity::EntityId,
    model::ActionModel,
};

/// Flat graph view of a workflow, as consumed and produced by the canvas
/// editor.
///
/// A derived, regenerable view: rebuilt from the persisted tree on load and
/// converted back on save, never the system of record. All structural edits
/// go through the entry points below so the forest shape survives them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasWorkflow {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub edges: Vec<CanvasEdge>,
    /// Flattened action list; nodes reference entries by id through their
    /// `action_ids` properties.
    #[serde(default)]
    pub actions: Vec<ActionModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CanvasWorkflow {
    /// get node by id
    pub fn node(
        &self,
        id: &EntityId,
    ) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// get mutable node by id
    pub fn node_mut(
        &mut self,
        id: &EntityId,
    ) -> Option<&mut CanvasNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// the single edge pointing at `target`, if the node is attached
    pub fn parent_edge(
        &self,
        target: &EntityId,
    ) -> Option<&CanvasEdge> {
        self.edges.iter().find(|e| &e.target == target)
    }

    /// Connect `source` to `target`, replacing any stale parent edge of
    /// `target` first. Reparenting is edge replacement: a node never holds
    /// two incoming edges at once.
    pub fn connect(
        &mut self,
        source: &EntityId,
        target: &EntityId,
    ) -> CanvasEdge {
        self.edges.retain(|e| &e.target != target);
        let edge = CanvasEdge::between(source.clone(), target.clone());
        self.edges.push(edge.clone());
        if let Some(node) = self.node_mut(target) {
            node.properties.parent_id = Some(source.clone());
        }
        edge
    }

    /// Remove a node: severs its one incoming edge, drops the edges it
    /// sourced (its children become roots), and detaches — without deleting
    /// — the actions it referenced.
    pub fn remove_node(
        &mut self,
        id: &EntityId,
    ) -> Option<CanvasNode> {
        let pos = self.nodes.iter().position(|n| &n.id == id)?;
        let node = self.nodes.remove(pos);
        self.edges.retain(|e| &e.source != id && &e.target != id);
        for child in self.nodes.iter_mut().filter(|n| n.properties.parent_id.as_ref() == Some(id)) {
            child.properties.parent_id = None;
        }
        Some(node)
    }

    /// Merge a server-minted canonical id over a local placeholder: the
    /// entity itself, every referencing edge (endpoints and derived ids),
    /// stored parent references, action-id references, and the flat action
    /// list.
    pub fn adopt_id(
        &mut self,
        local: &EntityId,
        canonical: Uuid,
    ) {
        let persisted = EntityId::Persisted(canonical);

        for node in self.nodes.iter_mut() {
            if &node.id == local {
                node.id = persisted.clone();
            }
            if node.properties.parent_id.as_ref() == Some(local) {
                node.properties.parent_id = Some(persisted.clone());
            }
            for action_id in node.properties.action_ids.iter_mut() {
                if action_id == local {
                    *action_id = persisted.clone();
                }
            }
        }

        for edge in self.edges.iter_mut() {
            let mut touched = false;
            if &edge.source == local {
                edge.source = persisted.clone();
                touched = true;
            }
            if &edge.target == local {
                edge.target = persisted.clone();
                touched = true;
            }
            if touched {
                edge.id = CanvasEdge::derive_id(&edge.source, &edge.target);
            }
        }

        for action in self.actions.iter_mut() {
            if action.id.as_ref() == Some(local) {
                action.id = Some(persisted.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{NodeProperties, Position};

    fn node(id: &str) -> CanvasNode {
        CanvasNode {
            id: EntityId::from(id),
            kind: "event".to_string(),
            position: Position::default(),
            label: id.to_string(),
            description: String::new(),
            properties: NodeProperties {
                event_type: "page_view".to_string(),
                ..NodeProperties::default()
            },
        }
    }

    fn canvas(nodes: Vec<CanvasNode>, edges: Vec<CanvasEdge>) -> CanvasWorkflow {
        CanvasWorkflow {
            id: EntityId::from("wf"),
            name: "wf".to_string(),
            description: String::new(),
            nodes,
            edges,
            actions: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_connect_replaces_stale_parent_edge() {
        let mut canvas = canvas(
            vec![node("a"), node("b"), node("c")],
            vec![CanvasEdge::between(EntityId::from("a"), EntityId::from("c"))],
        );

        canvas.connect(&EntityId::from("b"), &EntityId::from("c"));

        assert_eq!(canvas.edges.len(), 1);
        let edge = canvas.parent_edge(&EntityId::from("c")).unwrap();
        assert_eq!(edge.source, EntityId::from("b"));
        assert_eq!(
            canvas.node(&EntityId::from("c")).unwrap().properties.parent_id,
            Some(EntityId::from("b"))
        );
    }

    #[test]
    fn test_remove_node_severs_edges_and_keeps_actions() {
        let mut target = node("b");
        target.properties.action_ids = vec![EntityId::from("act")];
        let mut orphan = node("c");
        orphan.properties.parent_id = Some(EntityId::from("b"));

        let mut canvas = canvas(
            vec![node("a"), target, orphan],
            vec![
                CanvasEdge::between(EntityId::from("a"), EntityId::from("b")),
                CanvasEdge::between(EntityId::from("b"), EntityId::from("c")),
            ],
        );
        canvas.actions.push(ActionModel::new("show_message"));

        let removed = canvas.remove_node(&EntityId::from("b")).unwrap();
        assert_eq!(removed.id, EntityId::from("b"));
        assert!(canvas.edges.is_empty());
        // detached, not deleted
        assert_eq!(canvas.actions.len(), 1);
        assert_eq!(canvas.node(&EntityId::from("c")).unwrap().properties.parent_id, None);
    }

    #[test]
    fn test_adopt_id_rewrites_all_references() {
        let local = EntityId::from("event-17");
        let mut child = node("c");
        child.properties.parent_id = Some(local.clone());

        let mut cv = canvas(
            vec![node("event-17"), child],
            vec![CanvasEdge::between(local.clone(), EntityId::from("c"))],
        );

        let canonical = Uuid::new_v4();
        cv.adopt_id(&local, canonical);

        let persisted = EntityId::Persisted(canonical);
        assert!(cv.node(&persisted).is_some());
        assert!(cv.node(&local).is_none());
        assert_eq!(cv.edges[0].source, persisted);
        assert_eq!(cv.edges[0].id, CanvasEdge::derive_id(&persisted, &EntityId::from("c")));
        assert_eq!(cv.node(&EntityId::from("c")).unwrap().properties.parent_id, Some(persisted));
    }
}
