//! Background work for the GUI thread.
//!
//! Every network call runs on its own thread with a current-thread tokio
//! runtime. Results come back over std mpsc channels that the UI drains once
//! per frame, so the egui loop never blocks.

use crate::config::{ChainConfig, ReceiptPolling};
use crate::error::MultisendError;
use crate::multisend::MultisendCall;
use crate::submission::{drive_submission, SubmissionEvent, SubmissionId};
use crate::wallet::WalletProvider;
use eframe::egui;
use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tokio::runtime::{Builder, Runtime};

fn runtime() -> Result<Runtime, MultisendError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| MultisendError::NetworkOrRpcFailure(format!("Failed to create async runtime: {}", e)))
}

/// One-shot background task whose result is polled from the UI.
pub struct AsyncJob<T> {
    receiver: Option<Receiver<Result<T, MultisendError>>>,
}

impl<T: Send + 'static> AsyncJob<T> {
    /// Run `builder()` to completion on a worker thread.
    pub fn spawn<FutBuilder, Fut>(ctx: &egui::Context, builder: FutBuilder) -> Self
    where
        FutBuilder: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, MultisendError>> + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = match runtime() {
                Ok(rt) => rt.block_on(builder()),
                Err(e) => Err(e),
            };
            let _ = tx.send(result);
            ctx.request_repaint();
        });
        Self { receiver: Some(rx) }
    }

    /// `Some(result)` once the job has finished.
    pub fn poll(&mut self) -> Option<Result<T, MultisendError>> {
        let rx = self.receiver.as_ref()?;
        match rx.try_recv() {
            Ok(res) => {
                self.receiver = None;
                Some(res)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(Err(MultisendError::NetworkOrRpcFailure(
                    "Worker task disconnected".to_string(),
                )))
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Event stream of one running submission.
pub struct SubmissionWorker {
    receiver: Receiver<(SubmissionId, SubmissionEvent)>,
}

/// What draining the worker produced this frame.
pub enum Drained {
    Events(Vec<(SubmissionId, SubmissionEvent)>),
    /// The worker is gone; whatever it emitted is included
    Finished(Vec<(SubmissionId, SubmissionEvent)>),
}

impl SubmissionWorker {
    pub fn spawn<W>(
        ctx: &egui::Context,
        wallet: W,
        call: MultisendCall,
        chain: ChainConfig,
        polling: ReceiptPolling,
        id: SubmissionId,
    ) -> Self
    where
        W: WalletProvider + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let rt = match runtime() {
                Ok(rt) => rt,
                Err(error) => {
                    let _ = tx.send((id, SubmissionEvent::Rejected { error }));
                    ctx.request_repaint();
                    return;
                }
            };
            rt.block_on(drive_submission(&wallet, &call, &chain, polling, |event| {
                let _ = tx.send((id, event));
                ctx.request_repaint();
            }));
        });
        Self { receiver: rx }
    }

    /// Take every event queued so far.
    pub fn drain(&self) -> Drained {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Drained::Events(events),
                Err(TryRecvError::Disconnected) => return Drained::Finished(events),
            }
        }
    }
}
