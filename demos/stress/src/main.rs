//! Stress test - many tasks across a fixed worker pool
//!
//! Tests submitting a large number of tasks and measures submit and drain
//! throughput.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use workpool::Pool;

fn main() {
    println!("=== workpool Stress Test ===\n");

    let num_tasks: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    println!("Submitting {} tasks...", num_tasks);

    let mut pool = Pool::new(8).expect("failed to create pool");
    let completed = Arc::new(AtomicU64::new(0));

    let start = Instant::now();

    for i in 0..num_tasks {
        let completed = completed.clone();
        pool.submit(move || {
            completed.fetch_add(1, Ordering::Relaxed);
        })
        .expect("submit failed");

        if (i + 1) % 10_000 == 0 {
            print!("\rSubmitted: {}/{}", i + 1, num_tasks);
        }
    }

    let submit_time = start.elapsed();
    println!(
        "\n\nSubmit time: {:?} ({:.0} tasks/sec)",
        submit_time,
        num_tasks as f64 / submit_time.as_secs_f64()
    );

    pool.shutdown().expect("shutdown failed");

    println!("\nWaiting for drain...");
    let drain_start = Instant::now();
    pool.join().expect("join failed");
    let drain_time = drain_start.elapsed();

    let done = completed.load(Ordering::Relaxed) as usize;

    println!("\n=== Results ===");
    println!("Total tasks:  {}", num_tasks);
    println!("Completed:    {}", done);
    println!("Submit time:  {:?}", submit_time);
    println!("Drain time:   {:?}", drain_time);

    assert_eq!(done, num_tasks, "every submitted task must run exactly once");
}
