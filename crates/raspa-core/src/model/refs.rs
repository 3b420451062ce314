//! Referencias opacas a datos externos.
//!
//! El motor nunca abre estos ficheros: sólo los transporta de una iteración a
//! la siguiente. Quien los interpreta es el `CalculationExecutor`.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::WorkflowError;

/// Ejecutable de la simulación (input `code`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    pub label: String,
    pub executable: PathBuf,
}

impl CodeRef {
    pub fn new(label: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self { label: label.into(),
               executable: executable.into() }
    }

    pub(crate) fn validate(&self) -> Result<(), WorkflowError> {
        if self.executable.as_os_str().is_empty() {
            return Err(WorkflowError::configuration(format!("code '{}' has an empty executable path", self.label)));
        }
        Ok(())
    }
}

/// Estructura cristalina en formato CIF (input `structure`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRef {
    pub name: String,
    pub cif_path: PathBuf,
}

impl StructureRef {
    pub fn new(name: impl Into<String>, cif_path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(),
               cif_path: cif_path.into() }
    }

    /// El nombre acaba como `<nombre>.cif` dentro del directorio del job, así
    /// que no puede estar vacío ni contener separadores ni `..`.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let name = self.name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(WorkflowError::configuration(format!("structure name '{name}' is not a plain file name")));
        }
        if self.cif_path.as_os_str().is_empty() {
            return Err(WorkflowError::configuration(format!("structure '{name}' has an empty CIF path")));
        }
        Ok(())
    }
}

/// Carpeta con los artifacts recuperados de un cálculo.
///
/// `files` son rutas relativas a `path`, ordenadas. `hash` identifica el
/// contenido (lo asigna quien construye la carpeta).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFolder {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub path: PathBuf,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub hash: String,
}

impl ResultFolder {
    pub fn new(path: impl Into<PathBuf>, mut files: Vec<String>, hash: impl Into<String>) -> Self {
        files.sort();
        Self { id: Uuid::new_v4(),
               path: path.into(),
               files,
               hash: hash.into() }
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.files.iter().any(|f| f == relative)
    }
}
