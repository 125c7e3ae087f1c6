//! Pool configuration: compile-time defaults with environment overrides.
//!
//! Grounded on `gvthread_runtime::config::SchedulerConfig` — a plain struct
//! of tunables, a `from_env()` constructor that layers `WORKPOOL_*`
//! variables over defaults via `workpool_core::env::env_get`, and a
//! `new()` constructor that skips the environment entirely (used by tests
//! that want deterministic config regardless of the ambient shell).

use workpool_core::env::{env_get, env_get_opt};

const DEFAULT_THREAD_NAME_PREFIX: &str = "workpool-worker";
const MAX_WORKERS: usize = 128;

/// Tunables for `Pool::with_config`.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Prefix used to name worker threads: `"<prefix>-<index>"`.
    pub thread_name_prefix: String,
    /// Stack size for each worker thread, in bytes. `None` defers to the
    /// platform default, same as an unconfigured `thread::Builder`.
    pub thread_stack_size: Option<usize>,
}

impl PoolConfig {
    /// Compile-time defaults with no environment lookup — deterministic,
    /// for tests.
    pub fn new() -> Self {
        Self {
            num_workers: default_num_workers(),
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            thread_stack_size: None,
        }
    }

    /// Defaults layered with environment overrides.
    ///
    /// Recognized variables (all optional):
    /// - `WORKPOOL_NUM_WORKERS` - number of worker threads
    /// - `WORKPOOL_THREAD_NAME` - worker thread name prefix
    /// - `WORKPOOL_STACK_SIZE_BYTES` - per-worker stack size in bytes
    pub fn from_env() -> Self {
        Self {
            num_workers: env_get("WORKPOOL_NUM_WORKERS", default_num_workers()),
            thread_name_prefix: env_get(
                "WORKPOOL_THREAD_NAME",
                DEFAULT_THREAD_NAME_PREFIX.to_string(),
            ),
            thread_stack_size: env_get_opt("WORKPOOL_STACK_SIZE_BYTES"),
        }
    }

    /// Set the worker count.
    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    /// Set the worker thread name prefix.
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the per-worker thread stack size.
    pub fn thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_num_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(MAX_WORKERS)
}
