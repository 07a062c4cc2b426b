//! Fixed-size pool of worker threads for CPU-bound work.
//!
//! The async runtime that serves HTTP requests must never run the work
//! itself. `ExecutionPool` hands every unit to a dedicated rayon
//! `ThreadPool` and gives the caller back a [`JobHandle`], a future that
//! resolves once a worker has produced the value.
//!
//! - At most `workers` units execute at the same time; the rest wait in the
//!   rayon queue.
//! - `max_in_flight` bounds queued plus running units. Past that the pool
//!   answers `PoolError::Exhausted` instead of growing without limit.
//! - A panic inside the work is caught on the worker and reported as
//!   `ExecutionError::Panicked`. The worker thread is reused afterwards.

use crate::error::{ExecutionError, PoolError};
use futures_util::ready;
use log::{error, info};
use std::any::Any;
use std::future::Future;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::thread;
use tokio::sync::{oneshot, Notify};

#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Upper bound on queued plus running units.
    pub max_in_flight: usize,
}

impl PoolConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: available_parallelism(),
            max_in_flight: 1024,
        }
    }
}

pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub struct ExecutionPool {
    config: PoolConfig,
    workers: Mutex<Option<rayon::ThreadPool>>,
    in_flight: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl ExecutionPool {
    pub fn new(config: PoolConfig) -> Self {
        let config = PoolConfig {
            workers: config.workers.max(1),
            max_in_flight: config.max_in_flight.max(1),
        };
        Self {
            config,
            workers: Mutex::new(None),
            in_flight: Arc::new(AtomicUsize::new(0)),
            idle: Arc::new(Notify::new()),
        }
    }

    /// Spawns the worker threads. Starting a running pool does nothing.
    pub fn start(&self) -> Result<(), PoolError> {
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        if workers.is_some() {
            return Ok(());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|index| format!("offload-worker-{}", index))
            .panic_handler(|payload| {
                error!("Worker panicked outside a task: {}", panic_message(&*payload));
            })
            .build()?;
        *workers = Some(pool);

        info!(
            "Execution pool started with {} workers (max {} in flight)",
            self.config.workers, self.config.max_in_flight
        );
        Ok(())
    }

    /// Schedules `work` on a worker and returns without waiting for it.
    pub fn submit<F, T>(&self, work: F) -> Result<JobHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        // Held until the unit is queued so `stop` cannot tear the pool down in between.
        let workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        let pool = workers.as_ref().ok_or(PoolError::Shutdown)?;

        let max = self.config.max_in_flight;
        self.in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .map_err(PoolError::Exhausted)?;

        let slot = InFlightSlot {
            in_flight: Arc::clone(&self.in_flight),
            idle: Arc::clone(&self.idle),
        };
        let (tx, rx) = oneshot::channel();

        pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(work))
                .map_err(|payload| ExecutionError::Panicked(panic_message(&*payload)));
            // Freed before the send so a resolved handle always sees its slot released.
            drop(slot);
            // The receiver may be gone if nobody waits for the result anymore.
            let _ = tx.send(outcome);
        });

        Ok(JobHandle { rx })
    }

    /// Stops accepting work, waits for in-flight units, then tears the workers down.
    pub async fn stop(&self) {
        let pool = self
            .workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(pool) = pool else {
            return;
        };

        info!("Draining execution pool ({} in flight)", self.in_flight());
        loop {
            let idle = self.idle.notified();
            if self.in_flight.load(Ordering::Acquire) == 0 {
                break;
            }
            idle.await;
        }
        drop(pool);
        info!("Execution pool stopped");
    }

    pub fn is_running(&self) -> bool {
        self.workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn workers(&self) -> usize {
        self.config.workers
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases one in-flight slot when the unit is done, however it ended.
struct InFlightSlot {
    in_flight: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        if self.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Future resolving to the value produced by a submitted unit of work.
pub struct JobHandle<T> {
    rx: oneshot::Receiver<Result<T, ExecutionError>>,
}

impl<T> Future for JobHandle<T> {
    type Output = Result<T, ExecutionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let received = ready!(Pin::new(&mut self.rx).poll(cx));
        Poll::Ready(received.unwrap_or(Err(ExecutionError::Lost)))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
