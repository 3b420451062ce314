//! raspa-adapters: colaboradores concretos del motor de convergencia.
//!
//! - `LocalProcessExecutor`: ejecuta el binario de RASPA en un directorio de
//!   trabajo propio por job y devuelve ese directorio como carpeta recuperada.
//! - `ScriptedExecutor`: doble de test con resultados predefinidos.
//! - `input_file`: render de `simulation.input` a partir de los parámetros.
//! - `folder`: escaneo y hash de carpetas de resultados.

pub mod error;
pub mod executors;
pub mod folder;
pub mod input_file;

pub use error::AdapterError;
pub use executors::{LocalProcessExecutor, ScriptedExecutor, ScriptedOutcome};
