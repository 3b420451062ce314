use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{WorkflowEvent, WorkflowEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore: Send {
    /// Agrega un evento y devuelve la versión completa (con `seq` y `ts`).
    fn append_kind(&mut self, workflow_id: Uuid, kind: WorkflowEventKind) -> WorkflowEvent;
    /// Eventos de un workflow en orden ascendente de `seq`.
    fn list(&self, workflow_id: Uuid) -> Vec<WorkflowEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: HashMap<Uuid, Vec<WorkflowEvent>>,
}

impl InMemoryEventStore {
    pub fn workflow_ids(&self) -> Vec<Uuid> {
        self.inner.keys().copied().collect()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, workflow_id: Uuid, kind: WorkflowEventKind) -> WorkflowEvent {
        let events = self.inner.entry(workflow_id).or_default();
        let ev = WorkflowEvent { seq: events.len() as u64,
                                 workflow_id,
                                 kind,
                                 ts: Utc::now() };
        events.push(ev.clone());
        ev
    }

    fn list(&self, workflow_id: Uuid) -> Vec<WorkflowEvent> {
        self.inner.get(&workflow_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_per_workflow() {
        let mut store = InMemoryEventStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let kind = WorkflowEventKind::IterationStarted { iteration: 1,
                                                         input_fingerprint: "fp".into() };
        assert_eq!(store.append_kind(a, kind.clone()).seq, 0);
        assert_eq!(store.append_kind(a, kind.clone()).seq, 1);
        assert_eq!(store.append_kind(b, kind).seq, 0);
        assert_eq!(store.list(a).len(), 2);
        assert!(store.list(Uuid::new_v4()).is_empty());
        assert_eq!(store.workflow_ids().len(), 2);
    }
}
