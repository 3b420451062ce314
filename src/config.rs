//! Configuración de la aplicación.
//!
//! Se lee del entorno después de cargar `.env` (una sola vez). Los flags de la
//! CLI pueden sobrescribir cualquier valor con `with_scratch_dir` /
//! `with_max_iterations`.
use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::errors::AppError;

pub const ENV_SCRATCH_DIR: &str = "RASPAFLOW_SCRATCH_DIR";
pub const ENV_MAX_ITERATIONS: &str = "RASPAFLOW_MAX_ITERATIONS";
pub const ENV_LOG: &str = "RASPAFLOW_LOG";

pub const DEFAULT_SCRATCH_DIR: &str = "raspaflow-scratch";
pub const DEFAULT_LOG_FILTER: &str = "info";

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // sin .env no es un error
});

/// Fuerza la carga de `.env` (idempotente).
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Raíz bajo la que cada job crea su directorio de trabajo.
    pub scratch_dir: PathBuf,
    /// Límite de iteraciones del bucle; `None` no limita.
    pub max_iterations: Option<u32>,
    /// Filtro de logging (sintaxis de `EnvFilter`).
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
               max_iterations: None,
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let mut cfg = Self::default();
        if let Some(dir) = lookup(ENV_SCRATCH_DIR).filter(|v| !v.trim().is_empty()) {
            cfg.scratch_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_MAX_ITERATIONS).filter(|v| !v.trim().is_empty()) {
            cfg.max_iterations = Some(parse_max_iterations(&raw)?);
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            cfg.log_filter = filter;
        }
        Ok(cfg)
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn with_max_iterations(mut self, limit: Option<u32>) -> Self {
        if limit.is_some() {
            self.max_iterations = limit;
        }
        self
    }
}

pub fn parse_max_iterations(raw: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::Config(format!("{ENV_MAX_ITERATIONS} must be a positive integer, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.scratch_dir, PathBuf::from("raspaflow-scratch"));
    }

    #[test]
    fn reads_all_variables() {
        let cfg = AppConfig::from_lookup(lookup(&[(ENV_SCRATCH_DIR, "/tmp/jobs"),
                                                  (ENV_MAX_ITERATIONS, "5"),
                                                  (ENV_LOG, "raspa_core=debug")])).expect("cfg");
        assert_eq!(cfg.scratch_dir, PathBuf::from("/tmp/jobs"));
        assert_eq!(cfg.max_iterations, Some(5));
        assert_eq!(cfg.log_filter, "raspa_core=debug");
    }

    #[test]
    fn zero_or_garbage_iteration_limit_is_rejected() {
        assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_MAX_ITERATIONS, "0")])), Err(AppError::Config(_))));
        assert!(matches!(AppConfig::from_lookup(lookup(&[(ENV_MAX_ITERATIONS, "many")])), Err(AppError::Config(_))));
    }

    #[test]
    fn cli_overrides_only_when_given() {
        let cfg = AppConfig::default().with_max_iterations(Some(3)).with_max_iterations(None);
        assert_eq!(cfg.max_iterations, Some(3));
    }
}
