//! Ejecución local del binario de RASPA.
//!
//! Cada job tiene su propio directorio `<scratch>/<job_id>` con:
//! - `simulation.input` generado a partir de los parámetros,
//! - la estructura CIF copiada como `<nombre>.cif`,
//! - `RestartInitial/` copiado desde `Restart/` de la carpeta previa, si la
//!   hay y la contiene,
//! - `_scheduler-stdout.txt` / `_scheduler-stderr.txt` con la salida del
//!   proceso.
//!
//! El directorio completo se devuelve como carpeta `retrieved`.
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use raspa_core::{CalculationExecutor, CalculationOutputs, ExecutorFault, IterationInput, ResultFolder};
use tokio::process::Command;
use uuid::Uuid;

use crate::folder::{copy_dir_recursive, scan_folder};
use crate::input_file::{render_simulation_input, SIMULATION_INPUT};
use crate::AdapterError;

pub const STDOUT_FILE: &str = "_scheduler-stdout.txt";
pub const STDERR_FILE: &str = "_scheduler-stderr.txt";
pub const RESTART_DIR: &str = "Restart";
pub const RESTART_INITIAL_DIR: &str = "RestartInitial";

const STDERR_TAIL_BYTES: usize = 2048;

/// Últimos `max_bytes` de `text` como mucho, empezando en un límite de
/// carácter.
fn tail(text: &str, max_bytes: usize) -> &str {
    let mut start = text.len().saturating_sub(max_bytes);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[derive(Debug, Clone)]
pub struct LocalProcessExecutor {
    scratch_root: PathBuf,
    extra_args: Vec<String>,
}

impl LocalProcessExecutor {
    pub fn new(scratch_root: impl Into<PathBuf>) -> Self {
        Self { scratch_root: scratch_root.into(),
               extra_args: Vec::new() }
    }

    /// Argumentos añadidos tras el ejecutable en cada job.
    pub fn with_args<I, S>(mut self, args: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    async fn stage(&self, workdir: &Path, input: &IterationInput) -> Result<(), AdapterError> {
        input.structure
             .validate()
             .map_err(|e| AdapterError::InvalidInput(e.to_string()))?;
        tokio::fs::create_dir_all(workdir).await
                                          .map_err(|e| AdapterError::io(workdir, e))?;

        let input_path = workdir.join(SIMULATION_INPUT);
        tokio::fs::write(&input_path, render_simulation_input(&input.parameters)).await
                                                                                 .map_err(|e| AdapterError::io(&input_path, e))?;

        let cif_target = workdir.join(format!("{}.cif", input.structure.name));
        tokio::fs::copy(&input.structure.cif_path, &cif_target).await
                                                               .map_err(|e| AdapterError::io(&input.structure.cif_path, e))?;

        if let Some(parent) = &input.retrieved_parent_folder {
            let restart = parent.path.join(RESTART_DIR);
            if restart.is_dir() {
                let target = workdir.join(RESTART_INITIAL_DIR);
                let copied = tokio::task::spawn_blocking(move || copy_dir_recursive(&restart, &target))
                    .await
                    .map_err(|e| AdapterError::io(workdir, std::io::Error::other(e)))??;
                debug!("staged {copied} restart file(s) from {}", parent.path.display());
            } else {
                debug!("parent folder {} has no {RESTART_DIR}/ directory, starting fresh", parent.path.display());
            }
        }
        Ok(())
    }

    async fn launch(&self, workdir: &Path, input: &IterationInput) -> Result<(), AdapterError> {
        let executable = input.code.executable.display().to_string();
        if input.options.total_processes() > 1 {
            warn!("local executor runs a single process; ignoring {} requested processes",
                  input.options.total_processes());
        }

        let mut cmd = Command::new(&input.code.executable);
        cmd.args(&self.extra_args)
           .current_dir(workdir)
           .stdin(Stdio::null())
           .stdout(Stdio::piped())
           .stderr(Stdio::piped())
           .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| AdapterError::Spawn { executable: executable.clone(),
                                                                       source })?;
        let seconds = input.options.max_wallclock_seconds;
        let output = match tokio::time::timeout(Duration::from_secs(seconds), child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| AdapterError::io(workdir, e))?,
            Err(_) => return Err(AdapterError::Timeout { seconds }),
        };

        let stdout_path = workdir.join(STDOUT_FILE);
        tokio::fs::write(&stdout_path, &output.stdout).await
                                                      .map_err(|e| AdapterError::io(&stdout_path, e))?;
        let stderr_path = workdir.join(STDERR_FILE);
        tokio::fs::write(&stderr_path, &output.stderr).await
                                                      .map_err(|e| AdapterError::io(&stderr_path, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdapterError::ExitStatus { status: output.status.to_string(),
                                                  stderr_tail: tail(&stderr, STDERR_TAIL_BYTES).trim().to_string() });
        }
        Ok(())
    }

    async fn retrieve(&self, workdir: PathBuf) -> Result<ResultFolder, AdapterError> {
        let dir = workdir.clone();
        tokio::task::spawn_blocking(move || scan_folder(&dir)).await
                                                             .map_err(|e| AdapterError::io(&workdir, std::io::Error::other(e)))?
    }
}

#[async_trait]
impl CalculationExecutor for LocalProcessExecutor {
    fn name(&self) -> &str {
        "local-process"
    }

    async fn submit(&self, input: &IterationInput) -> Result<CalculationOutputs, ExecutorFault> {
        let job_id = Uuid::new_v4();
        let workdir = self.scratch_root.join(job_id.to_string());
        debug!("job {job_id} | staging in {}", workdir.display());

        self.stage(&workdir, input).await?;
        self.launch(&workdir, input).await?;
        let folder = self.retrieve(workdir).await?;
        Ok(CalculationOutputs::retrieved(job_id, folder))
    }
}

#[cfg(test)]
mod tests {
    use super::tail;

    #[test]
    fn tail_starts_on_a_char_boundary() {
        // 'é' ocupa dos bytes: cortar a 3 bytes cae en mitad del primero.
        assert_eq!(tail("éé", 3), "é");
        assert_eq!(tail("error: sin memoria", 7), "memoria");
        assert_eq!(tail("corto", 64), "corto");
    }
}
