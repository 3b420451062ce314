//! Tipos de evento del workflow.
//!
//! Los eventos son un informe observable de la ejecución (equivalente a los
//! `report` del motor anfitrión). No se usan para reanudar un workflow.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::WorkflowError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkflowEventKind {
    /// Primer evento de cada `workflow_id`.
    WorkflowInitialized {
        code: String,
        structure: String,
        has_parent_folder: bool,
    },
    IterationStarted { iteration: u32, input_fingerprint: String },
    /// El executor devolvió outputs para el job.
    CalculationSubmitted { iteration: u32, job_id: Uuid },
    IterationInspected {
        iteration: u32,
        retrieved_hash: String,
        converged: bool,
    },
    /// La iteración no llegó a inspeccionarse; `run_count` no avanzó.
    IterationFailed { iteration: u32, error: WorkflowError },
    WorkflowCompleted { run_count: u32, output_folder: Uuid },
    WorkflowFailed { run_count: u32, error: WorkflowError },
}

impl WorkflowEventKind {
    /// Etiqueta compacta, útil en tests y logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::WorkflowInitialized { .. } => "I",
            Self::IterationStarted { .. } => "S",
            Self::CalculationSubmitted { .. } => "X",
            Self::IterationInspected { .. } => "R",
            Self::IterationFailed { .. } => "F",
            Self::WorkflowCompleted { .. } => "C",
            Self::WorkflowFailed { .. } => "E",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    pub seq: u64,
    pub workflow_id: Uuid,
    pub kind: WorkflowEventKind,
    pub ts: DateTime<Utc>,
}
