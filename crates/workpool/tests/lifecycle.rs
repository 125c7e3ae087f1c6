//! End-to-end lifecycle scenarios, mirroring the seed tests SPEC_FULL.md
//! enumerates (S1-S7) plus the two Open-Questions resolutions this crate
//! makes explicit: the conjunctive `wait_while_idle` predicate and
//! `submit` called from inside a worker task.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use workpool::{Pool, PoolError};

/// S1. Empty lifecycle: create, shutdown, join_then_destroy — no work
/// executed, every step succeeds.
#[test]
fn s1_empty_lifecycle() {
    let pool = Pool::new(1).unwrap();
    pool.shutdown().unwrap();
    pool.join_then_destroy().unwrap();
}

/// S2. Serial FIFO: a single worker executes 32 submissions in submission
/// order.
#[test]
fn s2_serial_fifo_order() {
    let mut pool = Pool::new(1).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for i in 0..32 {
        let seen = seen.clone();
        pool.submit(move || seen.lock().unwrap().push(i)).unwrap();
    }

    pool.shutdown().unwrap();
    pool.join().unwrap();

    assert_eq!(*seen.lock().unwrap(), (0..32).collect::<Vec<_>>());
}

/// S3. Parallel completion: 8 workers, 8 tasks, all flags end up true.
#[test]
fn s3_parallel_completion() {
    let mut pool = Pool::new(8).unwrap();
    let done: Vec<Arc<AtomicBool>> = (0..8).map(|_| Arc::new(AtomicBool::new(false))).collect();

    for flag in &done {
        let flag = flag.clone();
        pool.submit(move || flag.store(true, Ordering::SeqCst)).unwrap();
    }

    pool.shutdown().unwrap();
    pool.join().unwrap();

    assert!(done.iter().all(|f| f.load(Ordering::SeqCst)));
}

/// S4. Reject after shutdown: submit after shutdown is REQUEST_REJECTED,
/// and final join_then_destroy still succeeds.
#[test]
fn s4_reject_after_shutdown() {
    let pool = Pool::new(8).unwrap();
    pool.shutdown().unwrap();

    let err = pool.submit(|| panic!("must not execute")).unwrap_err();
    assert_eq!(err, PoolError::Rejected);

    pool.join_then_destroy().unwrap();
}

/// S5. Push wakes a waiter: a pool with one idle worker observes a
/// submitted task within a bounded time.
#[test]
fn s5_push_wakes_a_waiter() {
    let mut pool = Pool::new(1).unwrap();
    let ran = Arc::new(AtomicBool::new(false));

    std::thread::sleep(Duration::from_millis(20));

    let ran_clone = ran.clone();
    pool.submit(move || ran_clone.store(true, Ordering::SeqCst)).unwrap();

    pool.shutdown().unwrap();
    pool.join().unwrap();

    assert!(ran.load(Ordering::SeqCst));
}

/// S6. Shutdown wakes a waiter: an idle worker with an empty queue still
/// terminates once shutdown is announced.
#[test]
fn s6_shutdown_wakes_a_waiter() {
    let mut pool = Pool::new(1).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    pool.shutdown().unwrap();
    pool.join().unwrap(); // must not hang
}

/// S7. Bulk drain: 1000 tasks across 8 workers, every counter reaches its
/// expected value.
#[test]
fn s7_bulk_drain() {
    let mut pool = Pool::new(8).unwrap();
    const N: usize = 1000;
    let counters: Vec<Arc<AtomicUsize>> = (0..N).map(|_| Arc::new(AtomicUsize::new(0))).collect();

    for counter in &counters {
        let counter = counter.clone();
        pool.submit(move || {
            counter.fetch_add(7, Ordering::SeqCst);
        })
        .unwrap();
    }

    pool.shutdown().unwrap();
    pool.join().unwrap();

    assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 7));
}

/// Idempotent shutdown: repeated calls all succeed and do not change
/// observable behavior.
#[test]
fn shutdown_is_idempotent() {
    let mut pool = Pool::new(2).unwrap();
    pool.shutdown().unwrap();
    pool.shutdown().unwrap();
    pool.shutdown().unwrap();
    pool.join().unwrap();
}

/// A task may submit further work to the same pool; the engine holds no
/// lock across task execution, so this does not deadlock.
#[test]
fn submit_from_inside_a_worker_task() {
    let pool = Arc::new(Pool::new(2).unwrap());
    let inner_ran = Arc::new(AtomicBool::new(false));

    let pool_for_task = pool.clone();
    let inner_ran_clone = inner_ran.clone();
    pool.submit(move || {
        let inner_ran = inner_ran_clone.clone();
        let _ = pool_for_task.submit(move || {
            inner_ran.store(true, Ordering::SeqCst);
        });
    })
    .unwrap();

    std::thread::sleep(Duration::from_millis(50));
    pool.shutdown().unwrap();

    // Wait for both the outer and inner task to drain. Pool is shared via
    // Arc so we can't call the consuming join_then_destroy; poll instead.
    for _ in 0..100 {
        if inner_ran.load(Ordering::SeqCst) {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(inner_ran.load(Ordering::SeqCst));
}

/// Partial-construction safety: requesting zero workers is an invalid
/// argument, not a panic or a pool with zero threads.
#[test]
fn zero_workers_is_invalid_arg() {
    let err = Pool::new(0).unwrap_err();
    assert!(matches!(err, PoolError::InvalidArg(_)));
}

/// auto_sized produces a pool with at least one worker.
#[test]
fn auto_sized_has_at_least_one_worker() {
    let pool = Pool::auto_sized().unwrap();
    assert!(pool.worker_count() >= 1);
    pool.shutdown().unwrap();
}
