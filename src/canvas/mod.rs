//! Flat graph representation consumed and produced by the visual editor.

mod edge;
mod node;
mod workflow;

pub use edge::{CanvasEdge, EdgeKind, EdgeMarker};
pub use node::{CanvasNode, NodeProperties, Position};
pub use workflow::CanvasWorkflow;
