//! Opciones de planificación del cálculo (`options`).
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DEFAULT_MAX_WALLCLOCK_SECONDS, DEFAULT_NUM_MACHINES, DEFAULT_NUM_MPIPROCS_PER_MACHINE};
use crate::errors::WorkflowError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default = "default_num_machines")]
    pub num_machines: u32,
    #[serde(default = "default_num_mpiprocs")]
    pub num_mpiprocs_per_machine: u32,
}

fn default_num_machines() -> u32 {
    DEFAULT_NUM_MACHINES
}
fn default_num_mpiprocs() -> u32 {
    DEFAULT_NUM_MPIPROCS_PER_MACHINE
}
fn default_wallclock() -> u64 {
    DEFAULT_MAX_WALLCLOCK_SECONDS
}

impl Default for Resources {
    fn default() -> Self {
        Self { num_machines: DEFAULT_NUM_MACHINES,
               num_mpiprocs_per_machine: DEFAULT_NUM_MPIPROCS_PER_MACHINE }
    }
}

/// Opciones del cálculo. Las claves desconocidas se conservan en `extra` y
/// viajan intactas hasta el executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcOptions {
    #[serde(default)]
    pub resources: Resources,
    #[serde(default = "default_wallclock")]
    pub max_wallclock_seconds: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self { resources: Resources::default(),
               max_wallclock_seconds: DEFAULT_MAX_WALLCLOCK_SECONDS,
               extra: Map::new() }
    }
}

impl CalcOptions {
    pub fn total_processes(&self) -> u32 {
        self.resources.num_machines.saturating_mul(self.resources.num_mpiprocs_per_machine)
    }

    pub(crate) fn validate(&self) -> Result<(), WorkflowError> {
        if self.resources.num_machines == 0 || self.resources.num_mpiprocs_per_machine == 0 {
            return Err(WorkflowError::configuration("options.resources must request at least one machine and one process"));
        }
        if self.max_wallclock_seconds == 0 {
            return Err(WorkflowError::configuration("options.max_wallclock_seconds must be positive"));
        }
        Ok(())
    }
}
