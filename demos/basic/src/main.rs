//! Basic workpool example
//!
//! Demonstrates creating a pool, submitting a handful of tasks, and
//! shutting down cleanly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use workpool::Pool;

fn main() {
    println!("=== workpool Basic Example ===\n");

    let mut pool = Pool::new(4).expect("failed to create pool");

    let completed = Arc::new(AtomicUsize::new(0));
    let total_tasks = 3;

    println!("Submitting tasks...\n");

    let c1 = completed.clone();
    pool.submit(move || {
        println!("[task 1] started");
        for i in 0..3 {
            println!("[task 1] iteration {}", i);
        }
        println!("[task 1] finished");
        c1.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    let c2 = completed.clone();
    pool.submit(move || {
        println!("[task 2] started");
        for i in 0..3 {
            println!("[task 2] iteration {}", i);
        }
        println!("[task 2] finished");
        c2.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    let c3 = completed.clone();
    pool.submit(move || {
        println!("[task 3] started");
        println!("[task 3] finished");
        c3.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    pool.shutdown().expect("shutdown failed");
    pool.join().expect("join failed");

    println!(
        "\n{}/{} tasks completed!",
        completed.load(Ordering::SeqCst),
        total_tasks
    );
    println!("\n=== Example Complete ===");
}
