//! Criterio de convergencia inyectable.
//!
//! El workflow de referencia no define ningún criterio real: considera
//! convergido cualquier cálculo terminado. `AlwaysConverged` reproduce eso y
//! es el default. Un criterio real (tolerancia de carga, de energía, ...) se
//! suministra desde fuera implementando el trait o pasando un closure.
use crate::model::{CalculationOutputs, WorkflowContext};

pub trait ConvergencePredicate: Send + Sync {
    /// Se evalúa después de registrar la iteración en `ctx`: `run_count` y
    /// `last_result` ya reflejan el cálculo que se está inspeccionando.
    fn is_converged(&self, ctx: &WorkflowContext, outputs: &CalculationOutputs) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConverged;

impl ConvergencePredicate for AlwaysConverged {
    fn is_converged(&self, _ctx: &WorkflowContext, _outputs: &CalculationOutputs) -> bool {
        true
    }
}

impl<F> ConvergencePredicate for F
    where F: Fn(&WorkflowContext, &CalculationOutputs) -> bool + Send + Sync
{
    fn is_converged(&self, ctx: &WorkflowContext, outputs: &CalculationOutputs) -> bool {
        self(ctx, outputs)
    }
}
