//! Snapshot inmutable que recibe el executor en cada iteración.
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{CalcOptions, CodeRef, Parameters, ResultFolder, StructureRef};
use crate::hashing::hash_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationInput {
    pub workflow_id: Uuid,
    /// 1-based.
    pub iteration: u32,
    pub code: CodeRef,
    pub structure: StructureRef,
    pub parameters: Parameters,
    pub options: CalcOptions,
    pub retrieved_parent_folder: Option<ResultFolder>,
}

impl IterationInput {
    /// Fingerprint determinista del snapshot. No incluye `workflow_id` ni el
    /// `id` de la carpeta previa, sólo su hash de contenido: dos iteraciones
    /// con los mismos datos producen el mismo fingerprint.
    pub fn fingerprint(&self) -> String {
        let parent_hash = self.retrieved_parent_folder.as_ref().map(|f| f.hash.clone());
        hash_value(&json!({
            "engine_version": crate::constants::ENGINE_VERSION,
            "code": self.code,
            "structure": self.structure,
            "parameters": self.parameters,
            "options": self.options,
            "parent_hash": parent_hash,
        }))
    }
}
