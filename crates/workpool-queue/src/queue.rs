//! A thread-safe, FIFO, shutdown-aware queue of `Task`s.
//!
//! Grounded on the original `work_queue_t` (`thread_pool/src/work_queue.c`)
//! and on this codebase's own `Mutex` + `Condvar` patterns:
//! `gvthread_runtime::parking::fallback::FallbackParking` (park/wake over a
//! `Mutex<bool>` + `Condvar`) and
//! `gvthread_runtime::ready_queue::simple::GlobalQueue` (a
//! `Mutex<VecDeque<_>>` + `Condvar` that broadcasts on push-into-empty).
//!
//! All access to the embedded `TaskFifo` and to `stopped_accepting` happens
//! only while `mutex` is held; `Condvar::wait` is the one operation that
//! atomically releases and re-acquires it.

use std::sync::{Condvar, Mutex};

use workpool_core::error::PoolError;

use crate::fifo::TaskFifo;
use crate::task::Task;

struct Inner {
    fifo: TaskFifo,
    stopped_accepting: bool,
}

/// Outcome of a non-blocking `pop`.
#[derive(Debug)]
pub enum PopOutcome {
    /// A task was dequeued.
    Task(Task),
    /// The queue is empty but still accepting — the caller should wait.
    Underflow,
    /// The queue is empty and shutdown has been announced — terminal.
    Rejected,
}

/// The synchronized FIFO work queue underneath `workpool::Pool`.
pub struct WorkQueue {
    state: Mutex<Inner>,
    not_empty: Condvar,
}

impl WorkQueue {
    /// An empty queue, still accepting work.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Inner {
                fifo: TaskFifo::new(),
                stopped_accepting: false,
            }),
            not_empty: Condvar::new(),
        }
    }

    /// Enqueue a task.
    ///
    /// Broadcasts the not-empty condvar exactly when the FIFO transitions
    /// empty to non-empty — broadcast, not signal, because `wait_while_idle`
    /// is called speculatively by workers that may race each other and the
    /// producer.
    pub fn push(&self, task: Task) -> Result<(), PoolError> {
        let mut inner = self.state.lock()?;
        if inner.stopped_accepting {
            return Err(PoolError::Rejected);
        }
        let was_empty = inner.fifo.is_empty();
        inner.fifo.enqueue(task);
        if was_empty {
            self.not_empty.notify_all();
        }
        Ok(())
    }

    /// Attempt to dequeue a task without blocking.
    ///
    /// Never blocks itself; blocking is the caller's responsibility via
    /// `wait_while_idle`. This split lets a worker re-check state between
    /// wake-ups without nesting locks.
    pub fn pop(&self) -> Result<PopOutcome, PoolError> {
        let mut inner = self.state.lock()?;
        if let Some(task) = inner.fifo.dequeue() {
            return Ok(PopOutcome::Task(task));
        }
        if inner.stopped_accepting {
            Ok(PopOutcome::Rejected)
        } else {
            Ok(PopOutcome::Underflow)
        }
    }

    /// Block until the FIFO is non-empty or shutdown has been announced.
    ///
    /// The predicate is the conjunctive form — "sleep only while both empty
    /// and still accepting" — which guarantees a caller that follows this
    /// with `pop` will either see work or see `PopOutcome::Rejected`.
    /// Spurious wake-ups are tolerated by the loop.
    pub fn wait_while_idle(&self) -> Result<(), PoolError> {
        let mut inner = self.state.lock()?;
        while inner.fifo.is_empty() && !inner.stopped_accepting {
            inner = self.not_empty.wait(inner)?;
        }
        Ok(())
    }

    /// Stop accepting new work. Idempotent: repeated calls are no-ops past
    /// the first. Wakes every idle worker so each observes the terminal
    /// state.
    pub fn stop_accepting(&self) -> Result<(), PoolError> {
        let mut inner = self.state.lock()?;
        if inner.stopped_accepting {
            return Ok(());
        }
        inner.stopped_accepting = true;
        self.not_empty.notify_all();
        Ok(())
    }

    /// Whether the FIFO currently holds no pending tasks.
    pub fn is_empty(&self) -> Result<bool, PoolError> {
        Ok(self.state.lock()?.fifo.is_empty())
    }

    /// Number of tasks currently pending. Supplemental diagnostic accessor;
    /// not part of the original's surface.
    pub fn len(&self) -> Result<usize, PoolError> {
        Ok(self.state.lock()?.fifo.len())
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn push_then_pop_is_fifo() {
        let q = WorkQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..10 {
            let order = order.clone();
            q.push(Box::new(move || order.lock().unwrap().push(i))).unwrap();
        }
        for _ in 0..10 {
            match q.pop().unwrap() {
                PopOutcome::Task(t) => t(),
                other => panic!("expected a task, got {:?}", other),
            }
        }
        assert_eq!(*order.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn pop_on_empty_accepting_queue_is_underflow() {
        let q = WorkQueue::new();
        assert!(matches!(q.pop().unwrap(), PopOutcome::Underflow));
    }

    #[test]
    fn pop_on_empty_stopped_queue_is_rejected() {
        let q = WorkQueue::new();
        q.stop_accepting().unwrap();
        assert!(matches!(q.pop().unwrap(), PopOutcome::Rejected));
    }

    #[test]
    fn push_after_stop_is_rejected() {
        let q = WorkQueue::new();
        q.stop_accepting().unwrap();
        let err = q.push(Box::new(|| {})).unwrap_err();
        assert_eq!(err, PoolError::Rejected);
    }

    #[test]
    fn stop_accepting_is_idempotent() {
        let q = WorkQueue::new();
        q.stop_accepting().unwrap();
        q.stop_accepting().unwrap();
        assert!(matches!(q.pop().unwrap(), PopOutcome::Rejected));
    }

    #[test]
    fn push_wakes_a_waiter() {
        let q = Arc::new(WorkQueue::new());
        let got_task = Arc::new(AtomicUsize::new(0));

        let waiter = {
            let q = q.clone();
            let got_task = got_task.clone();
            std::thread::spawn(move || {
                q.wait_while_idle().unwrap();
                if let PopOutcome::Task(t) = q.pop().unwrap() {
                    t();
                    got_task.store(1, Ordering::SeqCst);
                }
            })
        };

        std::thread::sleep(Duration::from_millis(20));
        q.push(Box::new(|| {})).unwrap();
        waiter.join().unwrap();
        assert_eq!(got_task.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shutdown_wakes_a_waiter_on_empty_queue() {
        let q = Arc::new(WorkQueue::new());
        let waiter = {
            let q = q.clone();
            std::thread::spawn(move || {
                q.wait_while_idle().unwrap();
                matches!(q.pop().unwrap(), PopOutcome::Rejected)
            })
        };
        std::thread::sleep(Duration::from_millis(20));
        q.stop_accepting().unwrap();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn len_and_is_empty_track_depth() {
        let q = WorkQueue::new();
        assert!(q.is_empty().unwrap());
        q.push(Box::new(|| {})).unwrap();
        assert_eq!(q.len().unwrap(), 1);
        assert!(!q.is_empty().unwrap());
    }
}
