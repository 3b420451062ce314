//! Driver del workflow: máquina de estados, builder y cancelación.

pub mod builder;
pub mod cancel;
pub mod core;
pub mod state;

pub use builder::WorkflowBuilder;
pub use cancel::CancelFlag;
pub use self::core::ConvergenceLoopWorkflow;
pub use state::WorkflowState;
