//! # Canvasflow
//!
//! Canvasflow is the tree/graph conversion core of a visual workflow editor:
//! the bidirectional mapping between a persisted hierarchical workflow (a
//! forest of trigger events with attached actions) and the flat node/edge
//! graph a canvas editor operates on.
//!
//! The persisted tree is always the source of truth. The canvas graph is a
//! derived, regenerable view: it is rebuilt from the tree on load and
//! converted back on save, never incrementally patched where recomputation
//! is cheaper than micro-optimizing.
//!
//! ## Core Pieces
//!
//! - **Serialization**: [`json_to_canvas`] expands the persisted forest into
//!   positioned nodes, parent→child edges, and a flattened action list
//! - **Reconstruction**: [`canvas_to_json`] rebuilds the forest from the
//!   edited graph, re-deriving parent links from edges and re-attaching
//!   actions by id, with defensive forest-shape checks
//! - **Incremental Conversion**: [`canvas_to_json_node`] converts a single
//!   node so each interactive edit can issue one small persistence call
//! - **Identity**: [`EntityId`] distinguishes server-minted UUIDs from
//!   client-local placeholders, which are stripped from outgoing payloads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canvasflow::{Layout, WorkflowModel, canvas_to_json, json_to_canvas};
//!
//! let workflow = WorkflowModel::from_json(json_str)?;
//! let mut canvas = json_to_canvas(&workflow, &Layout::default());
//! // ... edit nodes and edges on the canvas ...
//! let saved = canvas_to_json(&canvas)?;
//! ```

mod canvas;
mod config;
mod convert;
mod error;
mod identity;
mod model;
mod store;
mod utils;

use std::sync::{Arc, RwLock};

pub use canvas::{CanvasEdge, CanvasNode, CanvasWorkflow, EdgeKind, EdgeMarker, NodeProperties, Position};
pub use config::{Config, LayoutConfig};
pub use convert::{Layout, canvas_to_json, canvas_to_json_node, canvas_to_json_nodes, json_to_canvas, serialize_actions, serialize_event, set_subordinates};
pub use error::CanvasflowError;
pub use identity::{EntityId, slug};
pub use model::{ActionModel, EventCategory, EventModel, MessageKind, MessageModel, MessageRef, WorkflowModel};
pub use store::{MemStore, WorkflowStore};

/// Result type alias for Canvasflow operations.
pub type Result<T> = std::result::Result<T, CanvasflowError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
