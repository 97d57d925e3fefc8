use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::MoveChooser;
use crate::error::ExecutorError;
use crate::game::Board;

/// Runs a chooser on a worker thread and waits for its answer, up to an
/// optional deadline.
///
/// Every request gets its own worker and its own result channel. When the
/// deadline passes the receiver is dropped and the worker is left to
/// finish on its own; whatever it sends afterwards goes nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveExecutor {
    timeout: Option<Duration>,
}

impl MoveExecutor {
    /// `None` waits for the chooser indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        if let Some(timeout) = timeout {
            log::info!("computed moves will time out after {:?}", timeout);
        }
        MoveExecutor { timeout }
    }

    /// Ask `chooser` for a column on a snapshot of `board`.
    pub fn choose(
        &self,
        chooser: &Arc<dyn MoveChooser>,
        board: &Board,
    ) -> Result<Option<usize>, ExecutorError> {
        let (tx, rx) = mpsc::channel();
        let worker_chooser = Arc::clone(chooser);
        let snapshot = board.clone();

        thread::Builder::new()
            .name("move-worker".into())
            .spawn(move || {
                let col = worker_chooser.choose_column(&snapshot);
                if tx.send(col).is_err() {
                    log::debug!(
                        "discarding late move {:?} from {}",
                        col,
                        worker_chooser.name()
                    );
                }
            })?;

        match self.timeout {
            Some(timeout) => match rx.recv_timeout(timeout) {
                Ok(col) => Ok(col),
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("{} took longer than {:?}", chooser.name(), timeout);
                    Err(ExecutorError::TimedOut(timeout))
                }
                Err(RecvTimeoutError::Disconnected) => Err(ExecutorError::WorkerFailed),
            },
            None => rx.recv().map_err(|_| ExecutorError::WorkerFailed),
        }
    }
}
