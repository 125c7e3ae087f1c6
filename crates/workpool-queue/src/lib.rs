//! # workpool-queue
//!
//! The synchronized work queue underneath `workpool::Pool`: an unbounded
//! FIFO of `Task`s protected by a mutex and a not-empty condvar, with a
//! monotonic `stopped_accepting` flag for shutdown.
//!
//! ## Modules
//!
//! - `task` - the `Task` type: a boxed, owned closure
//! - `fifo` - the plain, non-synchronized FIFO container
//! - `queue` - `WorkQueue`, the mutex/condvar-protected wrapper around it

pub mod fifo;
pub mod queue;
pub mod task;

pub use fifo::TaskFifo;
pub use queue::{PopOutcome, WorkQueue};
pub use task::Task;
