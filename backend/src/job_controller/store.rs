//! In-memory registry of every job the process has accepted.
//!
//! `JobStore` is a cheap, clonable handle around a shared map. The
//! dispatcher side creates and finishes jobs; the HTTP boundary only reads.
//! Records are never evicted.

use crate::error::JobError;
use common::jobs::{Job, JobStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct JobStore {
    /// A map from job ID to the job record.
    ///
    /// Concurrent status polls take the read lock; creation and the single
    /// terminal update per job take the write lock.
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new `Pending` job under a fresh ID and returns it.
    pub async fn create(&self) -> Job {
        let mut jobs = self.jobs.write().await;
        let mut uid = Uuid::new_v4();
        while jobs.contains_key(&uid) {
            uid = Uuid::new_v4();
        }
        let job = Job::new(uid);
        jobs.insert(uid, job.clone());
        job
    }

    pub async fn get(&self, uid: &Uuid) -> Result<Job, JobError> {
        self.jobs
            .read()
            .await
            .get(uid)
            .cloned()
            .ok_or(JobError::NotFound(*uid))
    }

    /// Moves a pending job to `Complete` with its result.
    pub async fn complete(&self, uid: &Uuid, result: String) -> Result<(), JobError> {
        self.finish(uid, |job| {
            job.status = JobStatus::Complete;
            job.result = Some(result);
        })
        .await
    }

    /// Moves a pending job to `Failed` with the reason.
    pub async fn fail(&self, uid: &Uuid, reason: String) -> Result<(), JobError> {
        self.finish(uid, |job| {
            job.status = JobStatus::Failed;
            job.error = Some(reason);
        })
        .await
    }

    async fn finish(&self, uid: &Uuid, apply: impl FnOnce(&mut Job)) -> Result<(), JobError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(uid).ok_or(JobError::NotFound(*uid))?;
        if job.is_finished() {
            return Err(JobError::AlreadyFinished(*uid));
        }
        apply(job);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Parses a job ID received as text, e.g. from a URL path segment.
pub fn parse_job_id(raw: &str) -> Result<Uuid, JobError> {
    Uuid::parse_str(raw).map_err(|_| JobError::MalformedId(raw.to_string()))
}
