use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a submitted job.
///
/// A job starts `Pending` and moves exactly once to one of the terminal
/// states. Nothing moves a job out of `Complete` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// The job is queued or executing on a worker.
    Pending,
    /// The job finished and its result is available.
    Complete,
    /// The job's work failed or panicked, or the pool refused it.
    Failed,
}

/// A unit of submitted work, as returned by `GET /status/{uid}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier assigned at creation.
    pub uid: Uuid,
    pub status: JobStatus,
    /// Output of the work. `None` until the job is `Complete`.
    pub result: Option<String>,
    /// Failure reason, only present when the job is `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn new(uid: Uuid) -> Self {
        Self {
            uid,
            status: JobStatus::Pending,
            result: None,
            error: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != JobStatus::Pending
    }
}
