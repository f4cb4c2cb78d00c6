//! Demonstrates the tracing events emitted by the safe executors
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use okresult::testing::catch_defect;
use okresult::{RetryPolicy, Safe, SafeAsync};

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    // Each retry logs its index, attempt number and delay
    let outcome = SafeAsync::new(|| async { Err::<(), _>("upstream unavailable") })
        .catch(|fault| async move { fault.to_string() })
        .retry(RetryPolicy::exponential(Duration::from_millis(20)).with_attempts(3))
        .run()
        .await;
    tracing::info!("Async outcome: {:?}", outcome);

    // A declining predicate is logged once
    let outcome = Safe::new(|| Err::<(), _>("bad request"))
        .catch(|fault| fault.to_string())
        .retry(RetryPolicy::times(3))
        .retry_if(|e: &String| e.contains("unavailable"))
        .run();
    tracing::info!("Blocking outcome: {:?}", outcome);

    // A defect is logged at error level before it unwinds
    let defect = catch_defect(|| {
        Safe::new(|| Err::<(), _>("disk full"))
            .catch(|_fault| -> String { panic!("error table not loaded") })
            .run()
    });
    if let Err(defect) = defect {
        tracing::warn!("Recovered defect: {}", defect);
    }
}
