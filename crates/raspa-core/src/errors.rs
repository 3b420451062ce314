//! Errores del motor de convergencia.
//!
//! `WorkflowError` es `Clone + Serialize` para poder registrarse tal cual en
//! los eventos (`IterationFailed`, `WorkflowFailed`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum WorkflowError {
    /// Falta un input requerido o es inválido.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// El colaborador externo falló al enviar o ejecutar el cálculo. No se
    /// reintenta.
    #[error("execution error: {0}")]
    Execution(String),
    /// `finalize` sin ninguna iteración completada.
    #[error("no iteration completed, output folder missing")]
    OutputMissing,
    #[error("workflow cancelled before iteration {next_iteration}")]
    Cancelled { next_iteration: u32 },
    #[error("iteration limit of {limit} reached without convergence")]
    IterationLimit { limit: u32 },
    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl WorkflowError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}
