//! Applies finished work to the job store.
//!
//! Continuations spawned by the dispatcher never write to the store
//! themselves. They push a `JobUpdate` into an MPSC channel and the single
//! updater task below turns it into the job's terminal state:
//! - `Ok(result)` completes the job.
//! - `Err(ExecutionError)` fails it with the error message.

use crate::error::ExecutionError;
use crate::job_controller::store::JobStore;
use log::{error, info, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Outcome of one job, sent by its continuation to the updater.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: Uuid,
    pub(crate) outcome: Result<String, ExecutionError>,
}

/// Runs until every sender is dropped, applying each update to `store`.
///
/// Spawned once next to the dispatcher (see `Dispatcher::spawn`).
pub async fn start_job_updater(store: JobStore, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let JobUpdate { job_id, outcome } = update;
        let applied = match outcome {
            Ok(result) => {
                info!("Job {} complete", job_id);
                store.complete(&job_id, result).await
            }
            Err(e) => {
                warn!("Job {} failed: {}", job_id, e);
                store.fail(&job_id, e.to_string()).await
            }
        };
        if let Err(e) = applied {
            error!("Dropping update for job {}: {}", job_id, e);
        }
    }
}
