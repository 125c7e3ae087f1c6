//! # workpool-core
//!
//! Platform-agnostic building blocks shared by `workpool-queue` and
//! `workpool`: the error taxonomy, environment-variable config helpers, and
//! leveled logging macros.
//!
//! ## Modules
//!
//! - `error` - `PoolError`, the status taxonomy every public operation returns
//! - `env` - generic `env_get<T>` and friends for config overrides
//! - `log` - leveled `p*!` logging macros, env-controlled verbosity

pub mod env;
pub mod error;
pub mod log;

pub use env::{env_get, env_get_bool, env_get_opt, env_get_str, env_is_set};
pub use error::{PoolError, PoolResult};
pub use log::LogLevel;
