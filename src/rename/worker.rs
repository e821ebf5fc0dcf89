//! Background execution of a batch.
//!
//! The executor runs on its own thread and reports through a channel, so
//! the caller decides which thread renders progress. Events arrive in
//! input order: one `Progress` per attempted entry, then exactly one
//! `Finished`.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use super::errors::BatchError;
use super::executor::{BatchExecutor, CancelToken, ProgressEvent};
use super::transfer::Transfer;
use super::types::{BatchResult, RenameConfig, SourceEntry, TransferMode};

#[derive(Debug)]
pub enum BatchEvent {
    Progress(ProgressEvent),
    Finished(Result<BatchResult, BatchError>),
}

/// Handle to a batch running on a worker thread
pub struct BatchHandle {
    events: Receiver<BatchEvent>,
    cancel: CancelToken,
    worker: Option<JoinHandle<()>>,
}

/// Start a batch on a dedicated worker thread
pub fn spawn_batch<T>(
    executor: BatchExecutor<T>,
    entries: Vec<SourceEntry>,
    config: RenameConfig,
    mode: TransferMode,
) -> BatchHandle
where
    T: Transfer + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    let worker = thread::spawn(move || {
        debug!(count = entries.len(), "Batch worker started");

        let progress_tx = tx.clone();
        let result = executor.execute(&entries, &config, mode, &worker_cancel, |event| {
            // Receiver gone means nobody is listening; keep going regardless
            let _ = progress_tx.send(BatchEvent::Progress(event));
        });

        let _ = tx.send(BatchEvent::Finished(result));
    });

    BatchHandle {
        events: rx,
        cancel,
        worker: Some(worker),
    }
}

impl BatchHandle {
    /// Request cooperative cancellation; takes effect before the next entry
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Blocking iterator over events; ends after `Finished`
    pub fn events(&self) -> impl Iterator<Item = BatchEvent> + '_ {
        self.events.iter()
    }

    /// Drain remaining events, calling `on_progress` for each progress
    /// event, and return the final result
    pub fn wait_with<F>(mut self, mut on_progress: F) -> Result<BatchResult, BatchError>
    where
        F: FnMut(&ProgressEvent),
    {
        let mut finished = None;

        for event in self.events.iter() {
            match event {
                BatchEvent::Progress(progress) => on_progress(&progress),
                BatchEvent::Finished(result) => {
                    finished = Some(result);
                    break;
                }
            }
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Batch worker panicked");
            }
        }

        finished.unwrap_or(Err(BatchError::WorkerLost))
    }

    /// Wait for the final result, discarding progress
    pub fn wait(self) -> Result<BatchResult, BatchError> {
        self.wait_with(|_| {})
    }
}
