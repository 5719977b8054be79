//! Graph→tree reconstruction: rebuilds the persisted event forest from the
//! flat node/edge/action lists as mutated by the canvas editor.

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use crate::{
    CanvasflowError, Result,
    canvas::CanvasWorkflow,
    convert::set_subordinates,
    identity::EntityId,
    model::{EventModel, WorkflowModel},
};

/// Rebuild the persisted event forest from the flat canvas view.
///
/// Roots are the nodes with no incoming edge; children are re-derived from
/// edges, actions re-attached by id. The canvas is mutated by many
/// independent editor handlers, so the forest shape is checked defensively:
/// a dangling edge endpoint, a node with two parents, or a cycle remnant
/// fails the whole conversion rather than silently losing data.
pub fn canvas_to_json(canvas: &CanvasWorkflow) -> Result<WorkflowModel> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut indices: HashMap<&EntityId, NodeIndex> = HashMap::new();

    for (pos, node) in canvas.nodes.iter().enumerate() {
        let idx = graph.add_node(pos);
        if indices.insert(&node.id, idx).is_some() {
            return Err(CanvasflowError::Structure(format!("duplicate node id {}", node.id)));
        }
    }

    for edge in &canvas.edges {
        let source = *indices
            .get(&edge.source)
            .ok_or_else(|| CanvasflowError::Structure(format!("edge {} references missing source node {}", edge.id, edge.source)))?;
        let target = *indices
            .get(&edge.target)
            .ok_or_else(|| CanvasflowError::Structure(format!("edge {} references missing target node {}", edge.id, edge.target)))?;
        graph.add_edge(source, target, ());
    }

    // forest invariant: at most one parent per node
    for idx in graph.node_indices() {
        let incoming = graph.neighbors_directed(idx, Direction::Incoming).count();
        if incoming > 1 {
            let node = &canvas.nodes[graph[idx]];
            return Err(CanvasflowError::Structure(format!("node {} has {} incoming edges", node.id, incoming)));
        }
    }

    let positions: HashMap<&EntityId, usize> = canvas.nodes.iter().enumerate().map(|(pos, node)| (&node.id, pos)).collect();

    // an isolated node has in-degree 0 and so becomes its own root; nothing
    // connected is ever silently discarded
    let mut visited = vec![false; canvas.nodes.len()];
    let mut events = Vec::new();
    for idx in graph.node_indices() {
        if graph.neighbors_directed(idx, Direction::Incoming).count() == 0 {
            let event = build_event(canvas, &positions, graph[idx], None, &mut visited)?;
            events.push(set_subordinates(event));
        }
    }

    // leftovers can only sit inside a cycle, which is invalid forest state
    if let Some(pos) = visited.iter().position(|v| !v) {
        return Err(CanvasflowError::Structure(format!(
            "node {} is unreachable from any root (cycle in canvas edges)",
            canvas.nodes[pos].id
        )));
    }

    Ok(WorkflowModel {
        id: canvas.id.clone(),
        name: canvas.name.clone(),
        description: canvas.description.clone(),
        is_active: true,
        live_status: false,
        events,
        created_at: canvas.created_at,
        updated_at: canvas.updated_at,
    })
}

fn build_event(
    canvas: &CanvasWorkflow,
    positions: &HashMap<&EntityId, usize>,
    node_pos: usize,
    parent_id: Option<&EntityId>,
    visited: &mut [bool],
) -> Result<EventModel> {
    visited[node_pos] = true;
    let node = &canvas.nodes[node_pos];

    // recursion terminates: a cycle reachable from a root would need a node
    // with two incoming edges, which is rejected above
    let mut children = Vec::new();
    for edge in canvas.edges.iter().filter(|e| e.source == node.id) {
        let child_pos = *positions
            .get(&edge.target)
            .ok_or_else(|| CanvasflowError::NotFound(format!("edge {} targets missing node {}", edge.id, edge.target)))?;
        children.push(build_event(canvas, positions, child_pos, Some(&node.id), visited)?);
    }

    let actions = canvas
        .actions
        .iter()
        .filter(|a| a.id.as_ref().is_some_and(|id| node.properties.action_ids.contains(id)))
        .cloned()
        .collect();

    let event_type = if node.properties.event_type.is_empty() {
        node.kind.clone()
    } else {
        node.properties.event_type.clone()
    };

    Ok(EventModel {
        id: Some(node.id.clone()),
        name: node.label.clone(),
        description: node.description.clone(),
        category: node.properties.category,
        event_type,
        parent_id: parent_id.cloned(),
        children,
        // recomputed by set_subordinates over the finished root
        subordinates: 0,
        actions,
        position_x: Some(node.position.x),
        position_y: Some(node.position.y),
        created_at: node.properties.created_at.or(canvas.created_at),
        updated_at: node.properties.updated_at.or(canvas.updated_at),
    })
}
