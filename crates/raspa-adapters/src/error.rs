//! Errores de los adaptadores. El motor los recibe como `ExecutorFault` y
//! los reporta como `WorkflowError::Execution`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to launch '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid calculation input: {0}")]
    InvalidInput(String),
    #[error("calculation exceeded max_wallclock_seconds={seconds}")]
    Timeout { seconds: u64 },
    #[error("calculation exited with {status}: {stderr_tail}")]
    ExitStatus { status: String, stderr_tail: String },
    #[error("scripted failure: {0}")]
    Scripted(String),
    #[error("no scripted outcome left for iteration {iteration}")]
    ScriptExhausted { iteration: u32 },
}

impl AdapterError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(),
                   source }
    }
}
