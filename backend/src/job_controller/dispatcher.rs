//! # Job Dispatcher
//!
//! Turns a submission into a tracked job:
//!
//! 1.  **Registration**: a new `Pending` job is created in the `JobStore`.
//! 2.  **Scheduling**: the task is handed to the `ExecutionPool`, which only
//!     queues it. The caller is never blocked on the work itself.
//! 3.  **Continuation**: a Tokio task awaits the pool's `JobHandle` and sends
//!     the outcome as a `JobUpdate` to the job updater, which records the
//!     terminal state.
//! 4.  **Reply**: the job ID is returned right after scheduling, so the ID is
//!     always queryable before the work completes.
//!
//! If the pool refuses the work, the job is marked `Failed` and the pool
//! error is returned to the caller.

use crate::error::{DispatchError, ExecutionError};
use crate::job_controller::state::{start_job_updater, JobUpdate};
use crate::job_controller::store::JobStore;
use crate::pool::ExecutionPool;
use crate::task::Task;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

const UPDATE_CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct Dispatcher {
    store: JobStore,
    pool: Arc<ExecutionPool>,
    task: Arc<dyn Task>,
    tx: mpsc::Sender<JobUpdate>,
}

impl Dispatcher {
    /// Creates the dispatcher and spawns its job updater on the current runtime.
    pub fn spawn(store: JobStore, pool: Arc<ExecutionPool>, task: Arc<dyn Task>) -> Self {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        tokio::spawn(start_job_updater(store.clone(), rx));
        Self {
            store,
            pool,
            task,
            tx,
        }
    }

    pub async fn submit(&self, input: String) -> Result<Uuid, DispatchError> {
        let job_id = self.store.create().await.uid;

        let task = Arc::clone(&self.task);
        let handle = match self.pool.submit(move || task.run(&input)) {
            Ok(handle) => handle,
            Err(e) => {
                error!("Could not schedule job {}: {}", job_id, e);
                if let Err(store_err) = self.store.fail(&job_id, e.to_string()).await {
                    error!("Could not mark job {} as failed: {}", job_id, store_err);
                }
                return Err(e.into());
            }
        };

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = match handle.await {
                Ok(Ok(result)) => Ok(result),
                Ok(Err(reason)) => Err(ExecutionError::Failed(reason)),
                Err(e) => Err(e),
            };
            if tx.send(JobUpdate { job_id, outcome }).await.is_err() {
                error!("Job updater is gone, result of job {} is lost", job_id);
            }
        });

        info!("Job {} submitted", job_id);
        Ok(job_id)
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn pool(&self) -> &Arc<ExecutionPool> {
        &self.pool
    }
}
