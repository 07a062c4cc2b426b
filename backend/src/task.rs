use log::info;
use std::thread;
use std::time::Duration;

/// A CPU-bound unit of work executed on the execution pool.
///
/// Implementations run on a worker thread, never on the async runtime, so
/// they are free to block. An `Err` marks the job as failed.
pub trait Task: Send + Sync + 'static {
    fn run(&self, input: &str) -> Result<String, String>;
}

/// The service's reference task: waits for `delay`, then greets `input`.
pub struct Greeting {
    delay: Duration,
}

impl Greeting {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Task for Greeting {
    fn run(&self, input: &str) -> Result<String, String> {
        info!("Task starting: {}", input);
        thread::sleep(self.delay);
        info!("Task done");
        Ok(format!("Hello {}!", input))
    }
}
