mod action;
mod event;
mod message;
mod workflow;

pub use action::{ActionModel, MessageRef};
pub use event::{EventCategory, EventModel};
pub use message::{MessageKind, MessageModel};
pub use workflow::WorkflowModel;
