use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CanvasflowError, Result, convert::set_subordinates, identity::EntityId, model::EventModel};

/// Persisted workflow definition: a forest of event trees with attached
/// actions. The unit of persistence and the single source of truth; the
/// canvas graph is derived from it and converted back on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowModel {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub live_status: bool,
    /// Root-level events; children are nested, never shared.
    #[serde(default)]
    pub events: Vec<EventModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkflowModel {
    pub fn from_json(s: &str) -> Result<Self> {
        let workflow = serde_json::from_str::<WorkflowModel>(s);
        match workflow {
            Ok(v) => Ok(v),
            Err(e) => Err(CanvasflowError::Workflow(format!("{}", e))),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(CanvasflowError::from)
    }

    /// total number of events across the forest
    pub fn event_count(&self) -> usize {
        fn count(e: &EventModel) -> usize {
            1 + e.children.iter().map(count).sum::<usize>()
        }
        self.events.iter().map(count).sum()
    }

    /// search the whole forest for an event by id
    pub fn find_event(
        &self,
        id: &EntityId,
    ) -> Option<&EventModel> {
        self.events.iter().find_map(|e| e.find(id))
    }

    /// mutable search of the whole forest for an event by id
    pub fn find_event_mut(
        &mut self,
        id: &EntityId,
    ) -> Option<&mut EventModel> {
        self.events.iter_mut().find_map(|e| e.find_mut(id))
    }

    /// detach and return the subtree rooted at `id`, root or descendant
    pub fn remove_event(
        &mut self,
        id: &EntityId,
    ) -> Option<EventModel> {
        if let Some(pos) = self.events.iter().position(|e| e.id.as_ref() == Some(id)) {
            return Some(self.events.remove(pos));
        }
        self.events.iter_mut().find_map(|e| e.remove_descendant(id))
    }

    /// recompute derived subordinate counts over every root
    pub fn recount(&mut self) {
        self.events = std::mem::take(&mut self.events).into_iter().map(set_subordinates).collect();
    }
}
