//! Registro append-only de lo que ocurre en cada instancia de workflow.

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{WorkflowEvent, WorkflowEventKind};
