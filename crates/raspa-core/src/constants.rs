//! Constantes del motor.
//!
//! Los defaults de `options` reproducen los del workflow RASPA de referencia:
//! una máquina, un proceso MPI y una hora de walltime.

/// Versión lógica del motor. Entra en el fingerprint de cada
/// `IterationInput`, así que un cambio aquí invalida fingerprints previos.
pub const ENGINE_VERSION: &str = "R1.0";

pub const DEFAULT_NUM_MACHINES: u32 = 1;
pub const DEFAULT_NUM_MPIPROCS_PER_MACHINE: u32 = 1;
pub const DEFAULT_MAX_WALLCLOCK_SECONDS: u64 = 60 * 60;

/// Nombre del único output declarado por el workflow.
pub const OUTPUT_NAME: &str = "retrieved_parent_folder";

/// Clave que el colaborador externo debe rellenar con la carpeta recuperada.
pub const RETRIEVED_KEY: &str = "retrieved";
