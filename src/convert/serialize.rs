//! Tree→graph serialization: expands the persisted event forest into
//! positioned canvas nodes, parent→child edges, and a flattened action list.

use crate::{
    canvas::{CanvasEdge, CanvasNode, CanvasWorkflow, NodeProperties, Position},
    identity::EntityId,
    model::{ActionModel, EventModel, WorkflowModel},
};

/// Layout gaps applied when an event carries no explicit position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Horizontal gap between a parent and its children.
    pub x_gap: f64,
    /// Vertical gap between sibling rows.
    pub y_gap: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self { x_gap: 200.0, y_gap: 150.0 }
    }
}

/// Emit the canvas node for one event and, when `with_children` is set,
/// recursively for its descendants.
///
/// An explicit `position_x`/`position_y` on the event wins, preserving a
/// user-arranged layout. Otherwise children sit one `x_gap` right of the
/// parent, the first child one `y_gap` below it, and each later sibling is
/// pushed further down by `y_gap * (previous sibling's subordinates + 1)`,
/// cumulatively, so sibling subtrees never overlap.
pub fn serialize_event(
    event: &EventModel,
    x: f64,
    y: f64,
    with_children: bool,
    layout: &Layout,
) -> Vec<CanvasNode> {
    // an event arriving without an id is an unpersisted entity; give it a
    // placeholder the same way the editor would
    let id = event.id.clone().unwrap_or_else(EntityId::generate_local);
    let node_x = event.position_x.unwrap_or(x);
    let node_y = event.position_y.unwrap_or(y);

    let mut nodes = vec![CanvasNode {
        id,
        kind: event.event_type.clone(),
        position: Position { x: node_x, y: node_y },
        label: event.name.clone(),
        description: event.description.clone(),
        properties: NodeProperties {
            event_type: event.event_type.clone(),
            category: event.category,
            parent_id: event.parent_id.clone(),
            action_ids: event.actions.iter().filter_map(|a| a.id.clone()).collect(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        },
    }];

    if with_children {
        let child_x = node_x + layout.x_gap;
        let mut child_y = node_y + layout.y_gap;
        for (index, child) in event.children.iter().enumerate() {
            if index > 0 {
                child_y += layout.y_gap * (event.children[index - 1].subordinates as f64 + 1.0);
            }
            nodes.extend(serialize_event(child, child_x, child_y, true, layout));
        }
    }

    nodes
}

/// Flatten the actions attached to `event` (and, when `with_children` is
/// set, its whole subtree) into `out`, preserving attachment order.
pub fn serialize_actions(
    event: &EventModel,
    out: &mut Vec<ActionModel>,
    with_children: bool,
) {
    out.extend(event.actions.iter().cloned());
    if with_children {
        for child in &event.children {
            serialize_actions(child, out, true);
        }
    }
}

/// Expand a persisted workflow into the flat canvas view.
///
/// Every event in the forest yields exactly one node, and every non-root
/// event exactly one parent→child edge, so node count equals event count
/// and edge count equals event count minus root count.
pub fn json_to_canvas(
    workflow: &WorkflowModel,
    layout: &Layout,
) -> CanvasWorkflow {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut actions = Vec::new();

    let mut root_y = 0.0;
    for (index, event) in workflow.events.iter().enumerate() {
        if index > 0 {
            root_y += layout.y_gap * (workflow.events[index - 1].subordinates as f64 + 1.0);
        }
        nodes.extend(serialize_event(event, 0.0, root_y, true, layout));
        collect_edges(event, None, &mut edges);
        serialize_actions(event, &mut actions, true);
    }

    CanvasWorkflow {
        id: workflow.id.clone(),
        name: workflow.name.clone(),
        description: workflow.description.clone(),
        nodes,
        edges,
        actions,
        created_at: workflow.created_at,
        updated_at: workflow.updated_at,
    }
}

// The nesting is authoritative for parenthood; stored `parent_id` is the
// fallback so flat event lists (as produced by whole-workflow saves) also
// serialize correctly.
fn collect_edges(
    event: &EventModel,
    nesting_parent: Option<&EntityId>,
    edges: &mut Vec<CanvasEdge>,
) {
    let parent = nesting_parent.or(event.parent_id.as_ref());
    if let (Some(parent), Some(id)) = (parent, &event.id) {
        edges.push(CanvasEdge::between(parent.clone(), id.clone()));
    }
    for child in &event.children {
        collect_edges(child, event.id.as_ref(), edges);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::convert::set_subordinates;

    fn workflow(events: serde_json::Value) -> WorkflowModel {
        let mut wf = WorkflowModel::from_json(
            &json!({
                "id": "1",
                "name": "Welcome Campaign",
                "events": events,
            })
            .to_string(),
        )
        .unwrap();
        wf.recount();
        wf
    }

    #[test]
    fn test_single_event_node_fields() {
        let wf = workflow(json!([{
            "id": "start",
            "name": "Start",
            "description": "Beginning of the workflow",
            "event_type": "start",
        }]));

        let canvas = json_to_canvas(&wf, &Layout::default());
        assert_eq!(canvas.nodes.len(), 1);
        assert_eq!(canvas.edges.len(), 0);

        let node = &canvas.nodes[0];
        assert_eq!(node.id, EntityId::from("start"));
        assert_eq!(node.kind, "start");
        assert_eq!(node.label, "Start");
        assert_eq!(node.properties.event_type, "start");
        assert_eq!(node.position, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_explicit_position_wins() {
        let wf = workflow(json!([{
            "id": "start",
            "name": "Start",
            "event_type": "start",
            "position_x": 250.0,
            "position_y": 50.0,
        }]));

        let canvas = json_to_canvas(&wf, &Layout::default());
        assert_eq!(canvas.nodes[0].position, Position { x: 250.0, y: 50.0 });
    }

    #[test]
    fn test_sibling_offsets_skip_preceding_subtrees() {
        // first child owns a subtree of 2; second child must clear it
        let wf = workflow(json!([{
            "id": "root",
            "name": "Root",
            "event_type": "start",
            "children": [
                {
                    "id": "a",
                    "name": "A",
                    "event_type": "page_view",
                    "children": [
                        {"id": "a1", "name": "A1", "event_type": "page_view"},
                        {"id": "a2", "name": "A2", "event_type": "page_view"},
                    ],
                },
                {"id": "b", "name": "B", "event_type": "page_view"},
            ],
        }]));

        let layout = Layout::default();
        let canvas = json_to_canvas(&wf, &layout);

        let pos = |id: &str| canvas.node(&EntityId::from(id)).unwrap().position;
        assert_eq!(pos("a"), Position { x: 200.0, y: 150.0 });
        // pushed below A's subtree: y_gap * (2 + 1) past A
        assert_eq!(pos("b"), Position { x: 200.0, y: 150.0 + 150.0 * 3.0 });
        assert_eq!(pos("a1").x, 400.0);
    }

    #[test]
    fn test_counts_match_forest_shape() {
        let wf = workflow(json!([
            {
                "id": "r1",
                "name": "R1",
                "event_type": "start",
                "children": [
                    {"id": "c1", "name": "C1", "event_type": "page_view"},
                    {"id": "c2", "name": "C2", "event_type": "page_view"},
                ],
            },
            {"id": "r2", "name": "R2", "event_type": "start"},
        ]));

        let canvas = json_to_canvas(&wf, &Layout::default());
        assert_eq!(canvas.nodes.len(), wf.event_count());
        // edge count == event count - root count
        assert_eq!(canvas.edges.len(), 4 - 2);
        // no edge between independent roots
        assert!(!canvas.edges.iter().any(|e| e.source == EntityId::from("r2") || e.target == EntityId::from("r2")));
    }

    #[test]
    fn test_edges_emitted_at_every_depth() {
        let wf = workflow(json!([{
            "id": "a",
            "name": "A",
            "event_type": "start",
            "children": [{
                "id": "b",
                "name": "B",
                "event_type": "page_view",
                "children": [{"id": "c", "name": "C", "event_type": "page_view"}],
            }],
        }]));

        let canvas = json_to_canvas(&wf, &Layout::default());
        let pairs: Vec<(String, String)> = canvas.edges.iter().map(|e| (e.source.to_string(), e.target.to_string())).collect();
        assert_eq!(pairs, vec![("a".into(), "b".into()), ("b".into(), "c".into())]);
    }

    #[test]
    fn test_actions_flattened_from_whole_subtree() {
        let wf = workflow(json!([{
            "id": "root",
            "name": "Root",
            "event_type": "start",
            "actions": [{"id": "a1", "action_type": "show_message"}],
            "children": [{
                "id": "child",
                "name": "Child",
                "event_type": "page_view",
                "actions": [{"id": "a2", "action_type": "show_message"}],
            }],
        }]));

        let canvas = json_to_canvas(&wf, &Layout::default());
        assert_eq!(canvas.actions.len(), 2);
        assert_eq!(
            canvas.node(&EntityId::from("root")).unwrap().properties.action_ids,
            vec![EntityId::from("a1")]
        );
        assert_eq!(
            canvas.node(&EntityId::from("child")).unwrap().properties.action_ids,
            vec![EntityId::from("a2")]
        );
    }

    #[test]
    fn test_incremental_path_emits_single_node() {
        let event = set_subordinates(
            serde_json::from_value(json!({
                "id": "root",
                "name": "Root",
                "event_type": "start",
                "children": [{"id": "c", "name": "C", "event_type": "page_view"}],
            }))
            .unwrap(),
        );

        let nodes = serialize_event(&event, 0.0, 0.0, false, &Layout::default());
        assert_eq!(nodes.len(), 1);
    }
}
