use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use uuid::Uuid;

/// Errors raised by the job store and surfaced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Job ID not found: {0}")]
    NotFound(Uuid),

    #[error("Malformed job ID: {0}")]
    MalformedId(String),

    #[error("Job {0} has already finished")]
    AlreadyFinished(Uuid),
}

impl ResponseError for JobError {
    fn status_code(&self) -> StatusCode {
        match self {
            JobError::NotFound(_) | JobError::MalformedId(_) => StatusCode::NOT_FOUND,
            JobError::AlreadyFinished(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Reasons the execution pool refuses to schedule work.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Execution pool is shut down")]
    Shutdown,

    #[error("Execution pool is exhausted ({0} jobs in flight)")]
    Exhausted(usize),

    #[error("Failed to build worker threads: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
}

/// Failure of a single unit of work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("Task failed: {0}")]
    Failed(String),

    #[error("Task panicked: {0}")]
    Panicked(String),

    #[error("Worker dropped the task result")]
    Lost,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl ResponseError for DispatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::Pool(PoolError::Build(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Pool(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
