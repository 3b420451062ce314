use raspa_adapters::AdapterError;
use raspa_core::WorkflowError;
use thiserror::Error;

/// Errores de la capa de aplicación (configuración, ficheros, workflow).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON inválido en {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Carpeta previa inválida: {0}")]
    ParentFolder(#[source] AdapterError),
    #[error("Ejecución abortada por una segunda interrupción")]
    Interrupted,
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl AppError {
    /// Código de salida de la CLI: 3 configuración, 4 ejecución, 5 resto.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json { .. } | Self::ParentFolder(_) => 3,
            Self::Workflow(WorkflowError::Configuration(_)) => 3,
            Self::Workflow(WorkflowError::Execution(_)) => 4,
            _ => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_variant_format() {
        let err = AppError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn workflow_errors_are_transparent() {
        let err: AppError = WorkflowError::execution("exit status 1").into();
        assert_eq!(err.to_string(), "execution error: exit status 1");
        assert_eq!(err.exit_code(), 4);
        let missing: AppError = WorkflowError::OutputMissing.into();
        assert_eq!(missing.exit_code(), 5);
        assert_eq!(AppError::Interrupted.exit_code(), 5);
    }
}
