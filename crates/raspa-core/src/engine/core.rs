//! Driver del bucle `PREPARE -> EXECUTE -> INSPECT` hasta convergencia.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::constants::{OUTPUT_NAME, RETRIEVED_KEY};
use crate::convergence::ConvergencePredicate;
use crate::engine::{CancelFlag, WorkflowBuilder, WorkflowState};
use crate::errors::WorkflowError;
use crate::event::{EventStore, InMemoryEventStore, WorkflowEvent, WorkflowEventKind};
use crate::executor::CalculationExecutor;
use crate::model::{CalculationOutputs, IterationInput, WorkflowContext, WorkflowInputs, WorkflowOutput};

/// Workflow que repite un cálculo hasta que el predicado de convergencia se
/// cumple y publica la última carpeta recuperada.
///
/// Cada paso del bucle es un método público para poder conducirlo a mano;
/// `run` los encadena. El contexto (`WorkflowContext`) lo posee quien llama y
/// se presta a cada paso, nunca se comparte.
pub struct ConvergenceLoopWorkflow<X, E = InMemoryEventStore>
    where X: CalculationExecutor,
          E: EventStore
{
    executor: X,
    predicate: Box<dyn ConvergencePredicate>,
    event_store: E,
    cancel: CancelFlag,
    max_iterations: Option<u32>,
    state: WorkflowState,
}

impl<X> ConvergenceLoopWorkflow<X, InMemoryEventStore> where X: CalculationExecutor
{
    /// Builder con store en memoria y predicado `AlwaysConverged`.
    #[inline]
    pub fn builder(executor: X) -> WorkflowBuilder<X, InMemoryEventStore> {
        WorkflowBuilder::new(executor)
    }
}

impl<X, E> ConvergenceLoopWorkflow<X, E>
    where X: CalculationExecutor,
          E: EventStore
{
    pub(crate) fn from_parts(executor: X,
                             predicate: Box<dyn ConvergencePredicate>,
                             event_store: E,
                             cancel: CancelFlag,
                             max_iterations: Option<u32>)
                             -> Self {
        Self { executor,
               predicate,
               event_store,
               cancel,
               max_iterations,
               state: WorkflowState::Init }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self, workflow_id: Uuid) -> Vec<WorkflowEvent> {
        self.event_store.list(workflow_id)
    }

    /// Secuencia compacta de etiquetas de evento (`"I,S,X,R,C"`).
    pub fn event_tags(&self, workflow_id: Uuid) -> Vec<&'static str> {
        self.event_store.list(workflow_id).iter().map(|e| e.kind.tag()).collect()
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    fn transition(&mut self, next: WorkflowState) -> Result<(), WorkflowError> {
        if !self.state.can_transition_to(next) {
            return Err(WorkflowError::InvalidTransition { from: self.state.name().to_string(),
                                                          to: next.name().to_string() });
        }
        self.state = next;
        Ok(())
    }

    /// Valida los inputs y crea el contexto (`done = false`, `run_count = 0`).
    pub fn initialize(&mut self, inputs: WorkflowInputs) -> Result<WorkflowContext, WorkflowError> {
        let WorkflowInputs { code,
                             structure,
                             parameters,
                             options,
                             retrieved_parent_folder } = inputs;
        let structure = structure.ok_or_else(|| WorkflowError::configuration("input 'structure' is required"))?;
        let code = code.ok_or_else(|| WorkflowError::configuration("input 'code' is required"))?;
        structure.validate()?;
        code.validate()?;
        options.validate()?;

        self.state = WorkflowState::Init;
        let workflow_id = Uuid::new_v4();
        let has_parent_folder = retrieved_parent_folder.is_some();
        self.event_store.append_kind(workflow_id,
                                     WorkflowEventKind::WorkflowInitialized { code: code.label.clone(),
                                                                              structure: structure.name.clone(),
                                                                              has_parent_folder });
        debug!("workflow {workflow_id} initialized for structure '{}' with code '{}'",
               structure.name, code.label);
        Ok(WorkflowContext::new(workflow_id, code, structure, parameters, options, retrieved_parent_folder))
    }

    pub fn should_continue(&self, ctx: &WorkflowContext) -> bool {
        !ctx.is_done()
    }

    /// Construye el snapshot que recibirá el executor. Los parámetros se
    /// copian tal cual; no hay ajuste entre iteraciones.
    ///
    /// `code` y `structure` ya se validaron en `initialize`: un contexto no
    /// puede existir sin ellos.
    pub fn prepare_iteration(&mut self, ctx: &WorkflowContext) -> Result<IterationInput, WorkflowError> {
        self.transition(WorkflowState::Prepare)?;

        let input = IterationInput { workflow_id: ctx.workflow_id(),
                                     iteration: ctx.run_count() + 1,
                                     code: ctx.code().clone(),
                                     structure: ctx.structure().clone(),
                                     parameters: ctx.parameters().clone(),
                                     options: ctx.options().clone(),
                                     retrieved_parent_folder: ctx.last_result().cloned() };
        let input_fingerprint = input.fingerprint();
        debug!("workflow {} iteration {} prepared (fingerprint {input_fingerprint})",
               input.workflow_id, input.iteration);
        self.event_store.append_kind(ctx.workflow_id(),
                                     WorkflowEventKind::IterationStarted { iteration: input.iteration,
                                                                           input_fingerprint });
        Ok(input)
    }

    /// Entrega el snapshot al executor y espera a que el job termine.
    /// Cualquier fallo del colaborador se devuelve como
    /// `WorkflowError::Execution` sin reintentos.
    pub async fn execute_iteration(&mut self, input: &IterationInput) -> Result<CalculationOutputs, WorkflowError> {
        self.transition(WorkflowState::Execute)?;
        info!("workflow {} iteration {} | running calculation with RASPA via {}",
              input.workflow_id,
              input.iteration,
              self.executor.name());

        let outputs = self.executor.submit(input).await.map_err(|fault| {
                                                           warn!("workflow {} iteration {} | calculation failed: {fault}",
                                                                 input.workflow_id, input.iteration);
                                                           WorkflowError::execution(fault.to_string())
                                                       })?;

        info!("workflow {} iteration {} | job {} finished", input.workflow_id, input.iteration, outputs.job_id);
        self.event_store.append_kind(input.workflow_id,
                                     WorkflowEventKind::CalculationSubmitted { iteration: input.iteration,
                                                                               job_id: outputs.job_id });
        Ok(outputs)
    }

    /// Registra la carpeta recuperada, incrementa `run_count` y evalúa el
    /// predicado. Si converge marca `done`; `done` nunca vuelve a false.
    pub fn inspect_result(&mut self, ctx: &mut WorkflowContext, outputs: CalculationOutputs) -> Result<(), WorkflowError> {
        self.transition(WorkflowState::Inspect)?;
        let retrieved = outputs.retrieved.clone().ok_or_else(|| {
                                                      WorkflowError::execution(format!("job {} finished without a '{}' output",
                                                                                       outputs.job_id,
                                                                                       RETRIEVED_KEY))
                                                  })?;
        let retrieved_hash = retrieved.hash.clone();
        ctx.record_iteration(retrieved);
        let iteration = ctx.run_count();

        let converged = self.predicate.is_converged(ctx, &outputs);
        if converged {
            info!("workflow {} | calculation converged, terminating the workflow", ctx.workflow_id());
            ctx.mark_done();
        } else {
            info!("workflow {} iteration {iteration} | not converged, running another calculation",
                  ctx.workflow_id());
        }
        self.event_store.append_kind(ctx.workflow_id(),
                                     WorkflowEventKind::IterationInspected { iteration,
                                                                             retrieved_hash,
                                                                             converged });
        Ok(())
    }

    /// Publica la última carpeta recuperada como output
    /// `retrieved_parent_folder`.
    pub fn finalize(&mut self, ctx: &WorkflowContext) -> Result<WorkflowOutput, WorkflowError> {
        if ctx.run_count() == 0 {
            return Err(WorkflowError::OutputMissing);
        }
        let folder = ctx.last_result().cloned().ok_or(WorkflowError::OutputMissing)?;
        self.transition(WorkflowState::Done)?;
        info!("workflow {} | output '{OUTPUT_NAME}' -> {}", ctx.workflow_id(), folder.path.display());
        self.event_store.append_kind(ctx.workflow_id(),
                                     WorkflowEventKind::WorkflowCompleted { run_count: ctx.run_count(),
                                                                            output_folder: folder.id });
        Ok(WorkflowOutput { workflow_id: ctx.workflow_id(),
                            run_count: ctx.run_count(),
                            retrieved_parent_folder: folder })
    }

    /// Ejecuta el workflow completo.
    pub async fn run(&mut self, inputs: WorkflowInputs) -> Result<WorkflowOutput, WorkflowError> {
        let mut ctx = self.initialize(inputs)?;
        match self.drive(&mut ctx).await {
            Ok(output) => Ok(output),
            Err(err) => {
                self.fail(&ctx, &err);
                Err(err)
            }
        }
    }

    async fn drive(&mut self, ctx: &mut WorkflowContext) -> Result<WorkflowOutput, WorkflowError> {
        while self.should_continue(ctx) {
            let next_iteration = ctx.run_count() + 1;
            if self.cancel.is_cancelled() {
                return Err(WorkflowError::Cancelled { next_iteration });
            }
            if let Some(limit) = self.max_iterations {
                if ctx.run_count() >= limit {
                    return Err(WorkflowError::IterationLimit { limit });
                }
            }

            let input = self.prepare_iteration(ctx)?;
            let step = match self.execute_iteration(&input).await {
                Ok(outputs) => self.inspect_result(ctx, outputs),
                Err(err) => Err(err),
            };
            if let Err(err) = step {
                self.event_store.append_kind(ctx.workflow_id(),
                                             WorkflowEventKind::IterationFailed { iteration: input.iteration,
                                                                                  error: err.clone() });
                return Err(err);
            }
        }
        self.finalize(ctx)
    }

    fn fail(&mut self, ctx: &WorkflowContext, err: &WorkflowError) {
        // `InvalidTransition` sólo puede venir de un estado terminal.
        let _ = self.transition(WorkflowState::Failed);
        warn!("workflow {} failed after {} iteration(s): {err}", ctx.workflow_id(), ctx.run_count());
        self.event_store.append_kind(ctx.workflow_id(),
                                     WorkflowEventKind::WorkflowFailed { run_count: ctx.run_count(),
                                                                         error: err.clone() });
    }
}
