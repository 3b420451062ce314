//! Interrupciones de la CLI.
//!
//! La primera interrupción pide una parada cooperativa (`CancelFlag`): el
//! cálculo en curso termina y no se prepara otra iteración. La segunda
//! abandona el trabajo; al soltar el futuro, `kill_on_drop` mata el proceso
//! hijo.
use std::future::Future;

use log::warn;
use raspaflow::CancelFlag;
use tokio::sync::mpsc;

/// Reenvía cada Ctrl-C al canal devuelto.
pub fn ctrl_c_channel() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Ejecuta `work` atendiendo a `interrupts`. Devuelve `None` si una segunda
/// interrupción lo abortó.
pub async fn run_interruptible<F, T>(work: F, cancel: CancelFlag, mut interrupts: mpsc::UnboundedReceiver<()>) -> Option<T>
    where F: Future<Output = T>
{
    tokio::pin!(work);
    loop {
        tokio::select! {
            biased;
            signal = interrupts.recv() => match signal {
                Some(()) if !cancel.is_cancelled() => {
                    warn!("interrupt received, stopping after the current iteration (press Ctrl-C again to abort)");
                    cancel.cancel();
                }
                Some(()) => {
                    warn!("second interrupt received, aborting the running calculation");
                    return None;
                }
                None => return Some((&mut work).await),
            },
            out = &mut work => return Some(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_interrupt_only_requests_cancellation() {
        let cancel = CancelFlag::new();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(()).expect("send");
        drop(tx);

        let out = run_interruptible(async { 7 }, cancel.clone(), rx).await;
        assert_eq!(out, Some(7));
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn second_interrupt_abandons_the_work() {
        let cancel = CancelFlag::new();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(()).expect("first");
        tx.send(()).expect("second");

        let out = run_interruptible(std::future::pending::<u32>(), cancel.clone(), rx).await;
        assert_eq!(out, None);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn work_finishes_without_interrupts() {
        let cancel = CancelFlag::new();
        let (_tx, rx) = mpsc::unbounded_channel();
        let out = run_interruptible(async { "ok" }, cancel.clone(), rx).await;
        assert_eq!(out, Some("ok"));
        assert!(!cancel.is_cancelled());
    }
}
