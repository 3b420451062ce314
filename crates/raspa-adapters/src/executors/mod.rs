pub mod local_process;
pub mod scripted;

pub use local_process::LocalProcessExecutor;
pub use scripted::{ScriptedExecutor, ScriptedOutcome};
