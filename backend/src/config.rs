//! Command line and environment configuration.
//!
//! ```bash
//! offload --port 8080 --workers 4 --task-delay-ms 3000
//! OFFLOAD_HOST=0.0.0.0 OFFLOAD_WORKERS=8 offload
//! ```

use crate::pool::{available_parallelism, PoolConfig};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "offload")]
#[command(about = "Submit jobs over HTTP and poll their status")]
#[command(version)]
pub struct Config {
    /// Host/IP the server binds to
    #[arg(long, default_value = "127.0.0.1", env = "OFFLOAD_HOST")]
    pub host: String,

    /// Port the server listens on
    #[arg(short, long, default_value = "8080", env = "OFFLOAD_PORT")]
    pub port: u16,

    /// Worker threads in the execution pool (defaults to available parallelism)
    #[arg(short, long, env = "OFFLOAD_WORKERS")]
    pub workers: Option<usize>,

    /// Maximum jobs queued or running before submissions are refused
    #[arg(long = "max-in-flight", default_value = "1024", env = "OFFLOAD_MAX_IN_FLIGHT")]
    pub max_in_flight: usize,

    /// Artificial duration of each job in milliseconds
    #[arg(long = "task-delay-ms", default_value = "3000", env = "OFFLOAD_TASK_DELAY_MS")]
    pub task_delay_ms: u64,

    /// Open the submission page in the default browser after startup
    #[arg(long = "open-browser", env = "OFFLOAD_OPEN_BROWSER")]
    pub open_browser: bool,
}

impl Config {
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.workers.unwrap_or_else(available_parallelism),
            max_in_flight: self.max_in_flight,
        }
    }

    pub fn task_delay(&self) -> Duration {
        Duration::from_millis(self.task_delay_ms)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
