//! Single-node graph→tree conversion, used for the one-shot persistence
//! call issued after each interactive edit instead of re-serializing the
//! whole workflow.

use crate::{
    canvas::{CanvasEdge, CanvasNode},
    model::{ActionModel, EventModel},
};

/// Convert one canvas node into its event form without touching the rest of
/// the forest.
///
/// The parent is the single edge targeting this node, falling back to the
/// node's stored `parent_id` while it is still detached. Local placeholder
/// ids are stripped to `None` in the produced payload — the event's own id
/// and its actions' — so the server can mint canonical ids.
pub fn canvas_to_json_node(
    node: &CanvasNode,
    edges: &[CanvasEdge],
    actions: &[ActionModel],
) -> EventModel {
    let parent = edges.iter().find(|e| e.target == node.id);

    let node_actions = actions
        .iter()
        .filter(|a| a.id.as_ref().is_some_and(|id| node.properties.action_ids.contains(id)))
        .map(|a| {
            let mut action = a.clone();
            action.id = action.id.filter(|id| id.is_persisted());
            action
        })
        .collect();

    let event_type = if node.properties.event_type.is_empty() {
        node.kind.clone()
    } else {
        node.properties.event_type.clone()
    };

    EventModel {
        id: Some(node.id.clone()).filter(|id| id.is_persisted()),
        name: node.label.clone(),
        description: node.description.clone(),
        category: node.properties.category,
        event_type,
        parent_id: parent.map(|e| e.source.clone()).or_else(|| node.properties.parent_id.clone()),
        children: Vec::new(),
        subordinates: 0,
        actions: node_actions,
        position_x: Some(node.position.x),
        position_y: Some(node.position.y),
        created_at: node.properties.created_at,
        updated_at: node.properties.updated_at,
    }
}

/// Whole-list variant used by full-workflow saves: every node converted
/// against the same edge and action sets.
pub fn canvas_to_json_nodes(
    nodes: &[CanvasNode],
    edges: &[CanvasEdge],
    actions: &[ActionModel],
) -> Vec<EventModel> {
    nodes.iter().map(|n| canvas_to_json_node(n, edges, actions)).collect()
}
