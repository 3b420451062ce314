//! Arranque de un workflow desde un fichero de inputs JSON.
//!
//! Formato del fichero (sólo `code` y `structure` son obligatorios):
//!
//! ```json
//! {
//!   "code": {"label": "raspa@localhost", "executable": "/opt/raspa/bin/simulate"},
//!   "structure": {"name": "IRMOF-1", "cif_path": "IRMOF-1.cif"},
//!   "parameters": {"GeneralSettings": {"NumberOfCycles": 2000}},
//!   "options": {"max_wallclock_seconds": 1800}
//! }
//! ```
//!
//! Las rutas relativas de la estructura y de la carpeta previa se resuelven
//! respecto al directorio del fichero. El ejecutable se deja tal cual para
//! que pueda buscarse en `PATH`.
//!
//! La carpeta previa (`"retrieved_parent_folder": {"path": "prev_run"}`) se
//! escanea al cargar: `files` y `hash` reflejan su contenido real y el `id`
//! se conserva si viene en el fichero.
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use raspa_adapters::folder::scan_folder;
use raspa_adapters::LocalProcessExecutor;
use raspa_core::{CancelFlag, ConvergenceLoopWorkflow, WorkflowInputs, WorkflowOutput};

use crate::config::AppConfig;
use crate::errors::AppError;

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub fn load_inputs(path: &Path) -> Result<WorkflowInputs, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::Io { path: path.display().to_string(),
                                                                        source })?;
    let mut inputs: WorkflowInputs = serde_json::from_str(&raw).map_err(|source| AppError::Json { path: path.display().to_string(),
                                                                                                  source })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    if let Some(structure) = inputs.structure.as_mut() {
        structure.cif_path = resolve(base, &structure.cif_path);
    }
    if let Some(parent) = inputs.retrieved_parent_folder.as_mut() {
        let scanned = scan_folder(&resolve(base, &parent.path)).map_err(AppError::ParentFolder)?;
        parent.path = scanned.path;
        parent.files = scanned.files;
        parent.hash = scanned.hash;
    }
    Ok(inputs)
}

/// Ejecuta el workflow con el executor local configurado.
pub async fn run_workflow(inputs: WorkflowInputs, config: &AppConfig, cancel: CancelFlag) -> Result<WorkflowOutput, AppError> {
    fs::create_dir_all(&config.scratch_dir).map_err(|source| AppError::Io { path: config.scratch_dir.display().to_string(),
                                                                             source })?;
    let executor = LocalProcessExecutor::new(&config.scratch_dir);
    let mut workflow = ConvergenceLoopWorkflow::builder(executor).cancel_flag(cancel)
                                                                 .max_iterations(config.max_iterations)
                                                                 .build();
    let output = workflow.run(inputs).await?;
    info!("workflow {} finished after {} run(s); output folder {}",
          output.workflow_id,
          output.run_count,
          output.retrieved_parent_folder.path.display());
    Ok(output)
}

pub fn render_output(output: &WorkflowOutput) -> Result<String, AppError> {
    serde_json::to_string_pretty(output).map_err(|source| AppError::Json { path: "<output>".into(),
                                                                           source })
}

pub fn write_output(path: &Path, output: &WorkflowOutput) -> Result<(), AppError> {
    let text = render_output(output)?;
    fs::write(path, text).map_err(|source| AppError::Io { path: path.display().to_string(),
                                                          source })
}
