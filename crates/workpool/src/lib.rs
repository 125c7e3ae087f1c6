//! # workpool
//!
//! A fixed-size worker thread pool: long-lived OS threads draining a
//! shared, mutex/condvar-protected FIFO work queue of caller-supplied
//! closures.
//!
//! ## Quick start
//!
//! ```
//! use workpool::Pool;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let mut pool = Pool::new(4).unwrap();
//! let done = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..8 {
//!     let done = done.clone();
//!     pool.submit(move || { done.fetch_add(1, Ordering::SeqCst); }).unwrap();
//! }
//!
//! pool.shutdown().unwrap();
//! pool.join().unwrap();
//! assert_eq!(done.load(Ordering::SeqCst), 8);
//! ```
//!
//! ## Lifecycle
//!
//! `create (new/with_config/auto_sized)` → `submit`* → `shutdown` → `join`
//! (or `join_then_destroy`). `submit` after `shutdown` returns
//! `PoolError::Rejected` rather than blocking or panicking — producers use
//! this to detect shutdown.
//!
//! ## Modules
//!
//! - `config` - `PoolConfig`, compile-time defaults with environment overrides
//! - `pool` - `Pool`, the worker threads plus lifecycle protocol

pub mod config;
pub mod pool;

pub use config::PoolConfig;
pub use pool::Pool;

pub use workpool_core::error::{PoolError, PoolResult};
pub use workpool_queue::Task;
