/// Estado del driver.
///
/// Transiciones válidas:
/// - `Init` -> `Prepare` | `Done`
/// - `Prepare` -> `Execute`
/// - `Execute` -> `Inspect`
/// - `Inspect` -> `Prepare` | `Done`
/// - cualquiera no terminal -> `Failed`
///
/// `Done` y `Failed` son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Init,
    Prepare,
    Execute,
    Inspect,
    Done,
    Failed,
}

impl WorkflowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub fn can_transition_to(self, next: WorkflowState) -> bool {
        use WorkflowState::*;
        match (self, next) {
            (Init, Prepare) | (Init, Done) => true,
            (Prepare, Execute) => true,
            (Execute, Inspect) => true,
            (Inspect, Prepare) | (Inspect, Done) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Prepare => "PREPARE",
            Self::Execute => "EXECUTE",
            Self::Inspect => "INSPECT",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        }
    }
}
