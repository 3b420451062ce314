//! Inputs declarados del workflow.
//!
//! `code` y `structure` son obligatorios pero se modelan como `Option` para
//! que su ausencia (p. ej. en un JSON incompleto) llegue a `initialize` y se
//! reporte como `WorkflowError::Configuration` en vez de como error de
//! parseo.
use serde::{Deserialize, Serialize};

use super::{CalcOptions, CodeRef, Parameters, ResultFolder, StructureRef};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInputs {
    #[serde(default)]
    pub code: Option<CodeRef>,
    #[serde(default)]
    pub structure: Option<StructureRef>,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub options: CalcOptions,
    #[serde(default)]
    pub retrieved_parent_folder: Option<ResultFolder>,
}

impl WorkflowInputs {
    pub fn new(code: CodeRef, structure: StructureRef) -> Self {
        Self { code: Some(code),
               structure: Some(structure),
               ..Self::default() }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_options(mut self, options: CalcOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_parent_folder(mut self, folder: ResultFolder) -> Self {
        self.retrieved_parent_folder = Some(folder);
        self
    }
}
