//! Contexto mutable de una instancia de workflow.
//!
//! Lo crea `initialize`, lo muta únicamente `inspect_result` (una vez por
//! iteración) y se descarta cuando `finalize` devuelve el output. Ninguna
//! otra parte del motor guarda referencias a él.
use uuid::Uuid;

use super::{CalcOptions, CodeRef, Parameters, ResultFolder, StructureRef};

#[derive(Debug, Clone)]
pub struct WorkflowContext {
    workflow_id: Uuid,
    done: bool,
    run_count: u32,
    pub(crate) code: CodeRef,
    pub(crate) structure: StructureRef,
    pub(crate) parameters: Parameters,
    pub(crate) options: CalcOptions,
    /// Última carpeta recuperada. Antes de la primera iteración contiene la
    /// carpeta previa recibida como input (si la hubo).
    pub(crate) last_result: Option<ResultFolder>,
}

impl WorkflowContext {
    pub(crate) fn new(workflow_id: Uuid,
                      code: CodeRef,
                      structure: StructureRef,
                      parameters: Parameters,
                      options: CalcOptions,
                      prior_result: Option<ResultFolder>)
                      -> Self {
        Self { workflow_id,
               done: false,
               run_count: 0,
               code,
               structure,
               parameters,
               options,
               last_result: prior_result }
    }

    pub fn workflow_id(&self) -> Uuid {
        self.workflow_id
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Número de iteraciones completadas (inspeccionadas).
    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    pub fn code(&self) -> &CodeRef {
        &self.code
    }

    pub fn structure(&self) -> &StructureRef {
        &self.structure
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn options(&self) -> &CalcOptions {
        &self.options
    }

    pub fn last_result(&self) -> Option<&ResultFolder> {
        self.last_result.as_ref()
    }

    /// `done` sólo pasa de false a true; no existe operación inversa.
    pub(crate) fn mark_done(&mut self) {
        self.done = true;
    }

    pub(crate) fn record_iteration(&mut self, retrieved: ResultFolder) {
        self.last_result = Some(retrieved);
        self.run_count += 1;
    }
}
