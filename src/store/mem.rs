use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tracing::trace;
use uuid::Uuid;

use crate::{
    CanvasflowError, Result, ShareLock,
    identity::EntityId,
    model::{ActionModel, EventModel, MessageModel, WorkflowModel},
    store::WorkflowStore,
    utils,
};

/// Id-keyed in-memory collection guarded by a shared lock.
struct Collect<T> {
    name: &'static str,
    items: ShareLock<HashMap<Uuid, T>>,
}

impl<T: Clone> Collect<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn list(&self) -> Vec<T> {
        self.items.read().unwrap().values().cloned().collect()
    }

    fn find(
        &self,
        id: &Uuid,
    ) -> Result<T> {
        self.items
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CanvasflowError::NotFound(format!("{} {} not found", self.name, id)))
    }

    fn insert(
        &self,
        id: Uuid,
        item: T,
    ) {
        self.items.write().unwrap().insert(id, item);
    }

    fn update_with<R, F>(
        &self,
        id: &Uuid,
        f: F,
    ) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let mut items = self.items.write().unwrap();
        let item = items.get_mut(id).ok_or_else(|| CanvasflowError::NotFound(format!("{} {} not found", self.name, id)))?;
        f(item)
    }

    fn remove(
        &self,
        id: &Uuid,
    ) -> Result<bool> {
        match self.items.write().unwrap().remove(id) {
            Some(_) => Ok(true),
            None => Err(CanvasflowError::NotFound(format!("{} {} not found", self.name, id))),
        }
    }
}

/// In-memory store mirroring the behavior of the real backend: it mints v4
/// UUIDs for incoming entities, stamps timestamps, and keeps derived
/// subordinate counts consistent after every structural change.
pub struct MemStore {
    workflows: Collect<WorkflowModel>,
    messages: Collect<MessageModel>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            workflows: Collect::new("workflow"),
            messages: Collect::new("message"),
        }
    }
}

/// Replace local or missing ids with freshly minted canonical ones and
/// rewrite `parent_id` links down the tree.
fn mint_event_ids(
    events: &mut [EventModel],
    parent: Option<&EntityId>,
) {
    for event in events {
        if !event.id.as_ref().is_some_and(|id| id.is_persisted()) {
            event.id = Some(EntityId::Persisted(Uuid::new_v4()));
        }
        event.parent_id = parent.cloned();
        mint_action_ids(&mut event.actions);
        let parent_id = event.id.clone();
        mint_event_ids(&mut event.children, parent_id.as_ref());
    }
}

fn mint_action_ids(actions: &mut [ActionModel]) {
    for action in actions {
        if !action.id.as_ref().is_some_and(|id| id.is_persisted()) {
            action.id = Some(EntityId::Persisted(Uuid::new_v4()));
        }
    }
}

impl WorkflowStore for MemStore {
    fn list_workflows(&self) -> Result<Vec<WorkflowModel>> {
        trace!("mem::list_workflows");
        Ok(self.workflows.list())
    }

    fn get_workflow(
        &self,
        id: &Uuid,
    ) -> Result<WorkflowModel> {
        trace!("mem::get_workflow({})", id);
        self.workflows.find(id)
    }

    fn create_workflow(
        &self,
        workflow: &WorkflowModel,
    ) -> Result<WorkflowModel> {
        let id = Uuid::new_v4();
        trace!("mem::create_workflow -> {}", id);

        let mut stored = workflow.clone();
        stored.id = EntityId::Persisted(id);
        stored.created_at = Some(utils::time::now());
        stored.updated_at = stored.created_at;
        mint_event_ids(&mut stored.events, None);
        stored.recount();

        self.workflows.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_workflow(
        &self,
        id: &Uuid,
        workflow: &WorkflowModel,
    ) -> Result<WorkflowModel> {
        trace!("mem::update_workflow({})", id);
        self.workflows.update_with(id, |stored| {
            let created_at = stored.created_at;
            *stored = workflow.clone();
            stored.id = EntityId::Persisted(*id);
            stored.created_at = created_at;
            stored.updated_at = Some(utils::time::now());
            mint_event_ids(&mut stored.events, None);
            stored.recount();
            Ok(stored.clone())
        })
    }

    fn delete_workflow(
        &self,
        id: &Uuid,
    ) -> Result<bool> {
        trace!("mem::delete_workflow({})", id);
        self.workflows.remove(id)
    }

    fn create_event(
        &self,
        workflow_id: &Uuid,
        event: &EventModel,
    ) -> Result<EventModel> {
        trace!("mem::create_event({})", workflow_id);
        self.workflows.update_with(workflow_id, |wf| {
            let mut stored = event.clone();
            stored.id = Some(EntityId::Persisted(Uuid::new_v4()));
            stored.created_at = Some(utils::time::now());
            stored.updated_at = stored.created_at;
            mint_action_ids(&mut stored.actions);

            match &stored.parent_id {
                Some(parent_id) => {
                    let parent = wf
                        .find_event_mut(parent_id)
                        .ok_or_else(|| CanvasflowError::NotFound(format!("parent event {} not found", parent_id)))?;
                    parent.children.push(stored.clone());
                }
                None => wf.events.push(stored.clone()),
            }
            wf.recount();
            wf.updated_at = Some(utils::time::now());
            Ok(stored)
        })
    }

    fn update_event(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        event: &EventModel,
    ) -> Result<EventModel> {
        trace!("mem::update_event({}, {})", workflow_id, event_id);
        self.workflows.update_with(workflow_id, |wf| {
            let eid = EntityId::Persisted(*event_id);

            // validate before detaching so a bad payload leaves the tree untouched
            let subtree = wf.find_event(&eid).ok_or_else(|| CanvasflowError::NotFound(format!("event {} not found", event_id)))?;
            if let Some(parent_id) = &event.parent_id {
                if subtree.find(parent_id).is_some() {
                    return Err(CanvasflowError::Structure(format!(
                        "cannot reparent event {} under its own subtree node {}",
                        event_id, parent_id
                    )));
                }
                if wf.find_event(parent_id).is_none() {
                    return Err(CanvasflowError::NotFound(format!("parent event {} not found", parent_id)));
                }
            }

            let Some(current) = wf.remove_event(&eid) else {
                return Err(CanvasflowError::NotFound(format!("event {} not found", event_id)));
            };

            let mut updated = event.clone();
            updated.id = Some(eid);
            // incremental payloads never carry children
            updated.children = current.children;
            updated.created_at = current.created_at;
            updated.updated_at = Some(utils::time::now());
            mint_action_ids(&mut updated.actions);

            match updated.parent_id.clone() {
                Some(parent_id) => {
                    // existence checked above, lock held throughout
                    if let Some(parent) = wf.find_event_mut(&parent_id) {
                        parent.children.push(updated.clone());
                    }
                }
                None => wf.events.push(updated.clone()),
            }
            wf.recount();
            wf.updated_at = Some(utils::time::now());
            Ok(updated)
        })
    }

    fn delete_event(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
    ) -> Result<bool> {
        trace!("mem::delete_event({}, {})", workflow_id, event_id);
        self.workflows.update_with(workflow_id, |wf| {
            let eid = EntityId::Persisted(*event_id);
            if wf.remove_event(&eid).is_none() {
                return Err(CanvasflowError::NotFound(format!("event {} not found", event_id)));
            }
            wf.recount();
            wf.updated_at = Some(utils::time::now());
            Ok(true)
        })
    }

    fn create_action(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        action: &ActionModel,
    ) -> Result<ActionModel> {
        trace!("mem::create_action({}, {})", workflow_id, event_id);
        self.workflows.update_with(workflow_id, |wf| {
            let eid = EntityId::Persisted(*event_id);
            let event = wf.find_event_mut(&eid).ok_or_else(|| CanvasflowError::NotFound(format!("event {} not found", event_id)))?;

            let mut stored = action.clone();
            stored.id = Some(EntityId::Persisted(Uuid::new_v4()));
            stored.created_at = Some(utils::time::now());
            stored.updated_at = stored.created_at;
            event.actions.push(stored.clone());
            Ok(stored)
        })
    }

    fn update_action(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        action_id: &Uuid,
        action: &ActionModel,
    ) -> Result<ActionModel> {
        trace!("mem::update_action({}, {}, {})", workflow_id, event_id, action_id);
        self.workflows.update_with(workflow_id, |wf| {
            let eid = EntityId::Persisted(*event_id);
            let aid = EntityId::Persisted(*action_id);
            let event = wf.find_event_mut(&eid).ok_or_else(|| CanvasflowError::NotFound(format!("event {} not found", event_id)))?;
            let stored = event
                .actions
                .iter_mut()
                .find(|a| a.id.as_ref() == Some(&aid))
                .ok_or_else(|| CanvasflowError::NotFound(format!("action {} not found", action_id)))?;

            let created_at = stored.created_at;
            *stored = action.clone();
            stored.id = Some(aid);
            stored.created_at = created_at;
            stored.updated_at = Some(utils::time::now());
            Ok(stored.clone())
        })
    }

    fn delete_action(
        &self,
        workflow_id: &Uuid,
        event_id: &Uuid,
        action_id: &Uuid,
    ) -> Result<bool> {
        trace!("mem::delete_action({}, {}, {})", workflow_id, event_id, action_id);
        self.workflows.update_with(workflow_id, |wf| {
            let eid = EntityId::Persisted(*event_id);
            let aid = EntityId::Persisted(*action_id);
            let event = wf.find_event_mut(&eid).ok_or_else(|| CanvasflowError::NotFound(format!("event {} not found", event_id)))?;

            let before = event.actions.len();
            event.actions.retain(|a| a.id.as_ref() != Some(&aid));
            if event.actions.len() == before {
                return Err(CanvasflowError::NotFound(format!("action {} not found", action_id)));
            }
            Ok(true)
        })
    }

    fn list_messages(&self) -> Result<Vec<MessageModel>> {
        trace!("mem::list_messages");
        Ok(self.messages.list())
    }

    fn create_message(
        &self,
        message: &MessageModel,
    ) -> Result<MessageModel> {
        let id = Uuid::new_v4();
        trace!("mem::create_message -> {}", id);

        let mut stored = message.clone();
        stored.id = Some(EntityId::Persisted(id));
        stored.created_at = Some(utils::time::now());
        stored.updated_at = stored.created_at;
        self.messages.insert(id, stored.clone());
        Ok(stored)
    }
}
