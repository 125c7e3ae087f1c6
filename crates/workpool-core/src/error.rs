//! Error taxonomy for workpool
//!
//! A plain enum with `Display` and `std::error::Error`, no `thiserror` or
//! `anyhow` — matching the rest of this codebase's error types
//! (`KsvcError`, `SchedError`). `PoolError` maps one-to-one onto the status
//! taxonomy every public operation is documented to return: `INVALID_ARG`,
//! `MEM_ALLOC`, `SYS_FAIL`, `REQUEST_REJECTED`. There is no `SUCCESS`
//! variant — success is `Ok(())`/`Ok(T)`.

use core::fmt;
use std::sync::PoisonError;

/// Result type for workpool operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors that can occur while constructing or operating a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A caller-supplied argument violates a documented precondition
    /// (e.g. a worker count of zero).
    InvalidArg(String),

    /// Resource exhaustion surfaced during construction.
    MemAlloc,

    /// A system-primitive operation failed: thread spawn, thread join, or
    /// a poisoned lock observed after a worker panic.
    SysFail(String),

    /// `submit` was called after `shutdown`; the task was not enqueued.
    Rejected,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidArg(msg) => write!(f, "invalid argument: {}", msg),
            PoolError::MemAlloc => write!(f, "allocation failed"),
            PoolError::SysFail(msg) => write!(f, "system primitive failed: {}", msg),
            PoolError::Rejected => write!(f, "request rejected: pool has shut down"),
        }
    }
}

impl std::error::Error for PoolError {}

impl<T> From<PoisonError<T>> for PoolError {
    fn from(_: PoisonError<T>) -> Self {
        PoolError::SysFail("lock poisoned by a panicking worker".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            PoolError::InvalidArg("n must be >= 1".into()).to_string(),
            "invalid argument: n must be >= 1"
        );
        assert_eq!(PoolError::Rejected.to_string(), "request rejected: pool has shut down");
    }

    #[test]
    fn poison_error_converts_to_sys_fail() {
        let err: PoolError = PoisonError::new(()).into();
        assert!(matches!(err, PoolError::SysFail(_)));
    }
}
