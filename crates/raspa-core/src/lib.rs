//! raspa-core: bucle de convergencia para cálculos RASPA.
//!
//! El motor repite `PREPARE -> EXECUTE -> INSPECT` delegando la ejecución en
//! un `CalculationExecutor` hasta que un `ConvergencePredicate` se cumple, y
//! publica la última carpeta recuperada.
pub mod constants;
pub mod convergence;
pub mod engine;
pub mod errors;
pub mod event;
pub mod executor;
pub mod hashing;
pub mod model;

pub use convergence::{AlwaysConverged, ConvergencePredicate};
pub use engine::{CancelFlag, ConvergenceLoopWorkflow, WorkflowBuilder, WorkflowState};
pub use errors::WorkflowError;
pub use event::{EventStore, InMemoryEventStore, WorkflowEvent, WorkflowEventKind};
pub use executor::{CalculationExecutor, ExecutorFault};
pub use model::{CalcOptions, CalculationOutputs, CodeRef, IterationInput, Parameters, Resources, ResultFolder, StructureRef,
                WorkflowContext, WorkflowInputs, WorkflowOutput};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    /// Executor mínimo: devuelve siempre una carpeta nueva.
    struct EchoExecutor;

    #[async_trait]
    impl CalculationExecutor for EchoExecutor {
        fn name(&self) -> &str {
            "echo"
        }

        async fn submit(&self, input: &IterationInput) -> Result<CalculationOutputs, ExecutorFault> {
            let folder = ResultFolder::new(format!("/scratch/{}", input.iteration), vec!["Output".into()], "h");
            Ok(CalculationOutputs::retrieved(Uuid::new_v4(), folder))
        }
    }

    fn inputs() -> WorkflowInputs {
        WorkflowInputs::new(CodeRef::new("raspa", "/opt/raspa/bin/simulate"),
                            StructureRef::new("IRMOF-1", "IRMOF-1.cif"))
    }

    #[tokio::test]
    async fn manual_stepping_follows_state_machine() {
        let mut wf = ConvergenceLoopWorkflow::builder(EchoExecutor).build();
        let mut ctx = wf.initialize(inputs()).expect("init");
        assert_eq!(wf.state(), WorkflowState::Init);
        assert!(wf.should_continue(&ctx));

        let input = wf.prepare_iteration(&ctx).expect("prepare");
        assert_eq!(input.iteration, 1);
        assert_eq!(wf.state(), WorkflowState::Prepare);

        let outputs = wf.execute_iteration(&input).await.expect("execute");
        assert_eq!(wf.state(), WorkflowState::Execute);

        wf.inspect_result(&mut ctx, outputs).expect("inspect");
        assert_eq!(wf.state(), WorkflowState::Inspect);
        assert!(!wf.should_continue(&ctx));

        let out = wf.finalize(&ctx).expect("finalize");
        assert_eq!(wf.state(), WorkflowState::Done);
        assert_eq!(out.run_count, 1);
    }

    #[test]
    fn prepared_snapshot_copies_code_and_structure_from_context() {
        let mut wf = ConvergenceLoopWorkflow::builder(EchoExecutor).build();
        let ctx = wf.initialize(inputs()).expect("init");
        assert_eq!(ctx.code().label, "raspa");
        assert_eq!(ctx.structure().name, "IRMOF-1");

        let input = wf.prepare_iteration(&ctx).expect("prepare");
        assert_eq!(&input.code, ctx.code());
        assert_eq!(&input.structure, ctx.structure());
    }

    #[tokio::test]
    async fn skipping_prepare_is_rejected() {
        let mut wf = ConvergenceLoopWorkflow::builder(EchoExecutor).build();
        let ctx = wf.initialize(inputs()).expect("init");
        let input = IterationInput { workflow_id: ctx.workflow_id(),
                                     iteration: 1,
                                     code: ctx.code().clone(),
                                     structure: ctx.structure().clone(),
                                     parameters: Parameters::new(),
                                     options: CalcOptions::default(),
                                     retrieved_parent_folder: None };
        let err = wf.execute_iteration(&input).await.expect_err("must not execute from INIT");
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    }

    #[test]
    fn empty_executable_path_is_a_configuration_error() {
        let mut wf = ConvergenceLoopWorkflow::builder(EchoExecutor).build();
        let bad = WorkflowInputs::new(CodeRef::new("raspa", ""), StructureRef::new("IRMOF-1", "IRMOF-1.cif"));
        assert!(matches!(wf.initialize(bad), Err(WorkflowError::Configuration(_))));
    }
}
