//! raspaflow
//!
//! Librería de aplicación sobre `raspa-core` y `raspa-adapters`:
//! - `config`: configuración desde entorno / `.env`.
//! - `errors`: errores de aplicación con códigos de salida.
//! - `launcher`: carga de inputs JSON y ejecución con el executor local.

pub mod config;
pub mod errors;
pub mod launcher;

pub use config::AppConfig;
pub use errors::AppError;
pub use launcher::{load_inputs, run_workflow, write_output};
pub use raspa_core::{CancelFlag, WorkflowInputs, WorkflowOutput};
