//! Modelo de datos del workflow: referencias opacas (código, estructura,
//! carpeta de resultados), opciones de cálculo, contexto mutable e input de
//! cada iteración.

pub mod context;
pub mod input;
pub mod inputs;
pub mod options;
pub mod outputs;
pub mod refs;

pub use context::WorkflowContext;
pub use input::IterationInput;
pub use inputs::WorkflowInputs;
pub use options::{CalcOptions, Resources};
pub use outputs::{CalculationOutputs, WorkflowOutput};
pub use refs::{CodeRef, ResultFolder, StructureRef};

/// Parámetros de la simulación (mapa JSON neutral; el motor no los interpreta).
pub type Parameters = serde_json::Map<String, serde_json::Value>;
