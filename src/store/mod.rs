//! Storage boundary for workflows, events, actions, and message templates.
//!
//! The real backend is an external REST service; this module fixes the
//! contract the conversion core consumes and ships an in-memory
//! implementation for tests and offline use.

mod mem;

use uuid::Uuid;

use crate::{
    Result,
    model::{ActionModel, EventModel, MessageModel, WorkflowModel},
};

pub use mem::MemStore;

/// Contract of the persistence layer.
///
/// Create calls receive payloads with local placeholder ids stripped and
/// respond with the canonical, server-minted entity; callers merge the new
/// id back into canvas state via
/// [`CanvasWorkflow::adopt_id`](crate::CanvasWorkflow::adopt_id). A failed
/// call leaves the caller's in-memory state untouched.
pub trait WorkflowStore: Send + Sync {
    fn list_workflows(&self) -> Result<Vec<WorkflowModel>>;

    fn get_workflow(
        &self,
        id: &Uuid,
    ) -> Result<WorkflowModel>;

    /// Stores a new workflow, minting canonical ids for it and every event
    /// and action it carries.
    fn create_workflow(
        &self,
        workflow: &WorkflowModel,
    ) -> Result<WorkflowModel>;

    fn update_workflow(
        &self,
        id: &Uuid,
        workflow: &WorkflowModel,
    ) -> Result<WorkflowModel>;

    fn delete_workflow(
        &self,
        id: &Uuid,
    ) -> Result<bool>;

    /// Adds an event under its `parent_id` (or as a new root), returning it
    /// with canonical id and timestamps assigned.
    fn create_event(
        &self,
        workflow_id: &Uuid,
        event: &EventModel,
    ) -> Result<EventModel>;

    /// Updates an event in place; a changed `parent_id` reparents its whole
    /// subtree.
    fn update_event(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        event: &EventModel,
    ) -> Result<EventModel>;

    /// Deletes an event and its subtree.
    fn delete_event(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
    ) -> Result<bool>;

    fn create_action(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        action: &ActionModel,
    ) -> Result<ActionModel>;

    fn update_action(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        action_id: &Uuid,
        action: &ActionModel,
    ) -> Result<ActionModel>;

    fn delete_action(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        action_id: &Uuid,
    ) -> Result<bool>;

    fn list_messages(&self) -> Result<Vec<MessageModel>>;

    fn create_message(
        &self,
        message: &MessageModel,
    ) -> Result<MessageModel>;
}
