//! Bidirectional conversion between the persisted event forest and the flat
//! canvas graph.
//!
//! All conversion functions are pure, synchronous transformations over
//! in-memory structures. They never mutate their inputs, so a failed
//! conversion leaves canvas state untouched for the caller to retry or roll
//! back.

mod incremental;
mod reconstruct;
mod serialize;
mod subordinates;

pub use incremental::{canvas_to_json_node, canvas_to_json_nodes};
pub use reconstruct::canvas_to_json;
pub use serialize::{Layout, json_to_canvas, serialize_actions, serialize_event};
pub use subordinates::set_subordinates;
