//! `Pool`: a fixed set of worker threads draining a shared `WorkQueue`.
//!
//! Lifecycle, field layout, and the partial-construction rollback are
//! grounded on the original `tpool_t` (`thread_pool/src/tpool.c`) and on
//! `ksvc_module::fixed_pool::FixedPool` ("spawns N OS threads at
//! creation... Simple, predictable, safe"). The flexible array member the
//! original trails its struct with (`pthread_t threads[]`) becomes an owned
//! `Vec<JoinHandle<()>>`, per this codebase's own guidance for porting that
//! layout trick (Design Notes in SPEC_FULL.md).

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use workpool_core::error::PoolError;
use workpool_core::{pdebug, pinfo, ptrace};
use workpool_queue::{PopOutcome, Task, WorkQueue};

use crate::config::PoolConfig;

/// A fixed-size pool of worker threads draining a shared FIFO work queue.
///
/// Lifecycle: `new`/`with_config` → `submit`* → `shutdown` → `join` (or
/// `join_then_destroy`). Dropping a `Pool` that was never shut down leaves
/// its worker threads detached and blocked in `wait_while_idle` forever —
/// matching the original's documented contract that `join` without a prior
/// `shutdown` blocks indefinitely.
pub struct Pool {
    queue: Arc<WorkQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Create a pool of `n` worker threads with default configuration.
    ///
    /// Returns `PoolError::InvalidArg` if `n == 0`.
    pub fn new(n: usize) -> Result<Pool, PoolError> {
        Self::with_config(PoolConfig::new().num_workers(n))
    }

    /// Create a pool sized to the host's available parallelism (see
    /// `PoolConfig::default`), reading `WORKPOOL_*` environment overrides.
    pub fn auto_sized() -> Result<Pool, PoolError> {
        Self::with_config(PoolConfig::from_env())
    }

    /// Create a pool from an explicit configuration.
    ///
    /// If thread creation fails partway through (`k < config.num_workers`
    /// threads started), this issues `stop_accepting` on the queue, joins
    /// the `k` threads that did start (they exit because the queue is
    /// empty and stopped), and returns `PoolError::SysFail`. No threads are
    /// leaked and no half-constructed pool is ever returned to the caller.
    pub fn with_config(config: PoolConfig) -> Result<Pool, PoolError> {
        if config.num_workers == 0 {
            return Err(PoolError::InvalidArg("num_workers must be >= 1".to_string()));
        }

        let queue = Arc::new(WorkQueue::new());
        let mut workers = Vec::with_capacity(config.num_workers);

        for id in 0..config.num_workers {
            let mut builder = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name_prefix, id));
            if let Some(stack_size) = config.thread_stack_size {
                builder = builder.stack_size(stack_size);
            }

            let queue_for_worker = Arc::clone(&queue);
            match builder.spawn(move || worker_loop(queue_for_worker, id)) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    pdebug!("spawn failed for worker {id} ({e}), rolling back {} started", workers.len());
                    queue.stop_accepting()?;
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::SysFail(format!(
                        "failed to spawn worker {id} of {}: {e}",
                        config.num_workers
                    )));
                }
            }
        }

        pinfo!("pool started with {} workers", workers.len());
        Ok(Pool { queue, workers })
    }

    /// Number of worker threads actually running — equal to the requested
    /// count unless construction rolled back (in which case `new` would
    /// have returned `Err` instead, so this is always the full count for
    /// any successfully constructed `Pool`).
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Submit a task for execution by some worker.
    ///
    /// `Ok(())` means the task will execute exactly once, unless the
    /// process ends abnormally. Any `Err` means the task was NOT enqueued
    /// and will NOT execute.
    pub fn submit<F>(&self, routine: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let task: Task = Box::new(routine);
        self.queue.push(task)
    }

    /// Stop accepting new work. Idempotent; does not block or join.
    ///
    /// Queued tasks are unaffected — workers continue draining them.
    pub fn shutdown(&self) -> Result<(), PoolError> {
        pinfo!("shutdown requested");
        self.queue.stop_accepting()
    }

    /// Join every worker thread.
    ///
    /// Blocks indefinitely if `shutdown` was never called, since workers
    /// only terminate once the queue is both empty and shut down — this is
    /// a documented contract, not a bug. Attempts every join even if one
    /// fails (a worker panicked), returning `PoolError::SysFail` after all
    /// have been attempted if any did.
    pub fn join(&mut self) -> Result<(), PoolError> {
        let mut failures = Vec::new();
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("<unnamed>").to_string();
            if handle.join().is_err() {
                failures.push(name);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(PoolError::SysFail(format!(
                "{} worker(s) panicked: {}",
                failures.len(),
                failures.join(", ")
            )))
        }
    }

    /// `join`, consuming the pool. On success, the queue and any remaining
    /// handles are simply dropped — there is no separate `destroy` step in
    /// Rust's ownership model.
    pub fn join_then_destroy(mut self) -> Result<(), PoolError> {
        self.join()
    }
}

/// Worker state machine: `Idle` → `Draining` → `Terminated`.
///
/// A direct restructuring of the original's single `while` loop
/// (`thread_routine` in `tpool.c`) into the vocabulary this design names
/// explicitly.
enum WorkerState {
    Idle,
    Draining,
    Terminated,
}

fn worker_loop(queue: Arc<WorkQueue>, worker_id: usize) {
    workpool_core::log::set_worker_id(worker_id);
    ptrace!("worker started");

    let mut state = WorkerState::Idle;
    loop {
        state = match state {
            WorkerState::Idle => {
                if queue.wait_while_idle().is_err() {
                    break; // queue lock poisoned: treat as unrecoverable, terminate
                }
                next_state_after_pop(&queue)
            }
            WorkerState::Draining => next_state_after_pop(&queue),
            WorkerState::Terminated => break,
        };
    }

    ptrace!("worker terminated");
}

/// Attempt a pop and compute the next state, running the dequeued task (if
/// any) outside the queue's lock.
fn next_state_after_pop(queue: &WorkQueue) -> WorkerState {
    match queue.pop() {
        Ok(PopOutcome::Task(task)) => {
            task();
            WorkerState::Draining
        }
        Ok(PopOutcome::Underflow) => WorkerState::Idle,
        Ok(PopOutcome::Rejected) | Err(_) => WorkerState::Terminated,
    }
}
