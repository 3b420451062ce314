//! Builder de `ConvergenceLoopWorkflow`.
//!
//! El executor es obligatorio y se fija al crear el builder; el resto tiene
//! default: predicado `AlwaysConverged`, store en memoria, sin límite de
//! iteraciones y un `CancelFlag` propio.
//!
//! ```ignore
//! let mut wf = ConvergenceLoopWorkflow::builder(executor)
//!     .predicate(|ctx: &WorkflowContext, _o: &CalculationOutputs| ctx.run_count() >= 3)
//!     .max_iterations(Some(10))
//!     .build();
//! let output = wf.run(inputs).await?;
//! ```

use crate::convergence::{AlwaysConverged, ConvergencePredicate};
use crate::engine::{CancelFlag, ConvergenceLoopWorkflow};
use crate::event::{EventStore, InMemoryEventStore};
use crate::executor::CalculationExecutor;

pub struct WorkflowBuilder<X: CalculationExecutor, E: EventStore> {
    executor: X,
    predicate: Box<dyn ConvergencePredicate>,
    event_store: E,
    cancel: CancelFlag,
    max_iterations: Option<u32>,
}

impl<X: CalculationExecutor> WorkflowBuilder<X, InMemoryEventStore> {
    pub fn new(executor: X) -> Self {
        Self { executor,
               predicate: Box::new(AlwaysConverged),
               event_store: InMemoryEventStore::default(),
               cancel: CancelFlag::new(),
               max_iterations: None }
    }
}

impl<X: CalculationExecutor, E: EventStore> WorkflowBuilder<X, E> {
    /// Sustituye el criterio de convergencia.
    pub fn predicate<P>(mut self, predicate: P) -> Self
        where P: ConvergencePredicate + 'static
    {
        self.predicate = Box::new(predicate);
        self
    }

    /// Cambia el store de eventos (y por tanto el tipo del builder).
    pub fn event_store<S: EventStore>(self, event_store: S) -> WorkflowBuilder<X, S> {
        WorkflowBuilder { executor: self.executor,
                          predicate: self.predicate,
                          event_store,
                          cancel: self.cancel,
                          max_iterations: self.max_iterations }
    }

    /// Comparte un flag de cancelación con quien construye el workflow.
    pub fn cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Límite de iteraciones. `None` (default) no limita.
    pub fn max_iterations(mut self, limit: Option<u32>) -> Self {
        self.max_iterations = limit;
        self
    }

    pub fn build(self) -> ConvergenceLoopWorkflow<X, E> {
        ConvergenceLoopWorkflow::from_parts(self.executor,
                                            self.predicate,
                                            self.event_store,
                                            self.cancel,
                                            self.max_iterations)
    }
}
