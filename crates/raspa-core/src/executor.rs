//! Frontera con el sistema externo que ejecuta los cálculos.
//!
//! El motor sólo conoce este trait: entrega un `IterationInput` y espera
//! (`await`) hasta que el job termina. El planificador que hay detrás (un
//! proceso local, una cola de un clúster, un doble de test) lo decide quien
//! construye el workflow.
use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{CalculationOutputs, IterationInput};

/// Fallo opaco del colaborador. El motor lo convierte siempre en
/// `WorkflowError::Execution`.
pub type ExecutorFault = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait CalculationExecutor: Send + Sync {
    /// Nombre corto para logs.
    fn name(&self) -> &str;

    /// Envía el cálculo y se suspende hasta que termina o falla.
    async fn submit(&self, input: &IterationInput) -> Result<CalculationOutputs, ExecutorFault>;
}

#[async_trait]
impl<T> CalculationExecutor for Arc<T>
    where T: CalculationExecutor + ?Sized
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn submit(&self, input: &IterationInput) -> Result<CalculationOutputs, ExecutorFault> {
        (**self).submit(input).await
    }
}

#[async_trait]
impl<T> CalculationExecutor for Box<T>
    where T: CalculationExecutor + ?Sized
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn submit(&self, input: &IterationInput) -> Result<CalculationOutputs, ExecutorFault> {
        (**self).submit(input).await
    }
}
