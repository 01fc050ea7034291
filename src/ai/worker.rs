//! Background thread that runs solve requests.
//!
//! The UI loop stays synchronous; each submitted prompt is handed to a
//! dedicated thread running a single-threaded tokio runtime, and the outcome
//! comes back over a channel that the UI drains between frames.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::thread;

use futures::FutureExt;

use super::response::{AiError, SolveOutcome};
use super::solver::AiSolver;

/// A prompt waiting to be solved.
#[derive(Clone, Debug)]
pub struct SolveJob {
    pub prompt: String,
}

/// A finished solve, paired with the prompt that produced it.
#[derive(Debug)]
pub struct SolveDone {
    pub prompt: String,
    pub outcome: SolveOutcome,
}

/// Handle to the solve thread. Dropping it lets the thread exit once any
/// in-flight request finishes.
pub struct AiWorker {
    jobs: flume::Sender<SolveJob>,
    done: flume::Receiver<SolveDone>,
}

impl AiWorker {
    /// Spawn the worker thread for `solver`.
    pub fn spawn(solver: AiSolver) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (jobs_tx, jobs_rx) = flume::unbounded::<SolveJob>();
        let (done_tx, done_rx) = flume::unbounded::<SolveDone>();

        thread::Builder::new()
            .name("zcalc-ai".to_string())
            .spawn(move || {
                tracing::debug!(model = %solver.model(), "AI worker started");
                runtime.block_on(async move {
                    while let Ok(job) = jobs_rx.recv_async().await {
                        let outcome = AssertUnwindSafe(solver.solve(&job.prompt))
                            .catch_unwind()
                            .await
                            .unwrap_or_else(|panic| {
                                let message = panic_message(&*panic);
                                tracing::error!("AI solve panicked: {}", message);
                                SolveOutcome::Failed(AiError::Panicked(message))
                            });
                        let done = SolveDone {
                            prompt: job.prompt,
                            outcome,
                        };
                        if done_tx.send(done).is_err() {
                            break;
                        }
                    }
                });
                tracing::debug!("AI worker stopped");
            })?;

        Ok(Self {
            jobs: jobs_tx,
            done: done_rx,
        })
    }

    /// Queue a job. Hands the job back if the worker has gone away.
    pub fn submit(&self, job: SolveJob) -> Result<(), SolveJob> {
        self.jobs.send(job).map_err(|e| e.into_inner())
    }

    /// Take a finished solve without blocking.
    ///
    /// `Ok(None)` means nothing has finished yet. An error means the worker
    /// thread is gone and no further results will arrive.
    pub fn try_recv(&self) -> Result<Option<SolveDone>, AiError> {
        match self.done.try_recv() {
            Ok(done) => Ok(Some(done)),
            Err(flume::TryRecvError::Empty) => Ok(None),
            Err(flume::TryRecvError::Disconnected) => Err(AiError::WorkerStopped),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
