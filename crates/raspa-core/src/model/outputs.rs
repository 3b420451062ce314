//! Resultados: lo que resuelve el executor y lo que publica el workflow.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Parameters, ResultFolder};

/// Outputs de un cálculo terminado. `retrieved` es obligatorio para que la
/// iteración pueda inspeccionarse; su ausencia es un fallo de ejecución.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutputs {
    pub job_id: Uuid,
    pub retrieved: Option<ResultFolder>,
    #[serde(default)]
    pub output_parameters: Option<Parameters>,
}

impl CalculationOutputs {
    pub fn retrieved(job_id: Uuid, folder: ResultFolder) -> Self {
        Self { job_id,
               retrieved: Some(folder),
               output_parameters: None }
    }

    pub fn with_output_parameters(mut self, params: Parameters) -> Self {
        self.output_parameters = Some(params);
        self
    }
}

/// Output declarado del workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowOutput {
    pub workflow_id: Uuid,
    pub run_count: u32,
    pub retrieved_parent_folder: ResultFolder,
}
