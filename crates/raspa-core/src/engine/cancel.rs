use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancelación cooperativa. El driver la consulta entre iteraciones; un job
/// ya enviado no se interrumpe.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
