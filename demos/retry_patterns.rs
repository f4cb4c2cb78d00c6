//! Retry Patterns Example
//!
//! Demonstrates safe execution with the blocking and async executors.
//! Shows practical patterns including:
//! - Capturing errors and panics as outcomes
//! - Blocking retry
//! - Async retry with backoff strategies
//! - Conditional retry (retry_if)
//! - Timeout handling
//! - Fatal defects from a broken catch handler

use std::cell::Cell;
use std::convert::Infallible;
use std::time::Duration;

use okresult::testing::catch_defect;
use okresult::{
    safe, safe_with, Backoff, Fault, Outcome, RetryPolicy, Safe, SafeAsync, SafeOptions,
};

// ==================== Capturing Failures ====================

/// Example 1: errors and panics both become `Err`
fn example_capture() {
    println!("\n=== Example 1: Capturing Failures ===");

    let parsed = safe_with(SafeOptions {
        try_: || "x".parse::<i32>(),
        catch: |_| "bad input",
    });
    println!("parse \"x\": {:?}", parsed);

    let zero = std::hint::black_box(0);
    let divided = safe(|| Ok::<_, Infallible>(1 / zero));
    match divided {
        Outcome::Ok(v) => println!("1 / 0 = {}", v),
        Outcome::Err(e) => println!("1 / 0 failed: {}", e),
    }
}

// ==================== Blocking Retry ====================

/// Example 2: immediate retries without delay
fn example_blocking_retry() {
    println!("\n=== Example 2: Blocking Retry ===");

    let attempts = Cell::new(0);
    let outcome = Safe::new(|| {
        attempts.set(attempts.get() + 1);
        println!("  Attempt {}", attempts.get());
        if attempts.get() < 3 {
            Err("lock held")
        } else {
            Ok("lock acquired")
        }
    })
    .catch(|fault| fault.to_string())
    .retry(RetryPolicy::times(5))
    .run();

    println!("Result: {:?}", outcome);
}

// ==================== Backoff Strategies ====================

/// Example 3: delay schedules for each backoff
fn example_backoff_strategies() {
    println!("\n=== Example 3: Backoff Strategies ===");

    for backoff in [Backoff::Constant, Backoff::Linear, Backoff::Exponential] {
        let policy = RetryPolicy::new()
            .with_delay(Duration::from_millis(100))
            .with_backoff(backoff)
            .with_attempts(4);
        let delays: Vec<_> = (0..policy.attempts())
            .map(|i| policy.delay_for_retry(i))
            .collect();
        println!("{:?}: {:?}", backoff, delays);
    }
}

// ==================== Async Retry ====================

/// Example 4: async retry with exponential backoff
async fn example_async_retry() {
    println!("\n=== Example 4: Async Retry ===");

    let attempts = Cell::new(0);
    let start = tokio::time::Instant::now();
    let outcome = SafeAsync::new(|| {
        attempts.set(attempts.get() + 1);
        let n = attempts.get();
        async move {
            println!("  Attempt {} at {:?}", n, start.elapsed());
            if n < 3 {
                Err("connection refused")
            } else {
                Ok("connected")
            }
        }
    })
    .catch(|fault| async move { fault.to_string() })
    .retry(RetryPolicy::exponential(Duration::from_millis(50)).with_attempts(4))
    .run()
    .await;

    println!("Result: {:?}", outcome);
}

// ==================== Conditional Retry ====================

#[derive(Debug, Clone, PartialEq)]
enum HttpError {
    ServerError(u16),
    ClientError(u16),
    Crashed(String),
}

fn to_http_error(fault: Fault<HttpError>) -> HttpError {
    match fault {
        Fault::Raised(e) => e,
        Fault::Panicked(p) => HttpError::Crashed(p.to_string()),
    }
}

/// Example 5: only retry server errors
async fn example_conditional_retry() {
    println!("\n=== Example 5: Conditional Retry ===");

    let attempts = Cell::new(0);
    let outcome = SafeAsync::new(|| {
        attempts.set(attempts.get() + 1);
        async { Err::<&str, _>(HttpError::ClientError(404)) }
    })
    .catch(|fault| async move { to_http_error(fault) })
    .retry(RetryPolicy::constant(Duration::from_millis(20)).with_attempts(5))
    .retry_if(|e: &HttpError| matches!(e, HttpError::ServerError(_)))
    .run()
    .await;

    println!("Result: {:?} after {} attempt(s)", outcome, attempts.get());
}

// ==================== Timeout ====================

/// Example 6: bounding the whole execution
async fn example_timeout() {
    println!("\n=== Example 6: Timeout ===");

    let result = SafeAsync::new(|| async {
        tokio::time::sleep(Duration::from_millis(80)).await;
        Err::<(), _>(HttpError::ServerError(503))
    })
    .catch(|fault| async move { to_http_error(fault) })
    .retry(RetryPolicy::constant(Duration::from_millis(50)).with_attempts(10))
    .run_with_timeout(Duration::from_millis(300))
    .await;

    match result {
        Ok(outcome) => println!("  Finished: {:?}", outcome),
        Err(e) => println!("  {}", e),
    }
}

// ==================== Defects ====================

/// Example 7: a panicking catch handler is fatal
fn example_defect() {
    println!("\n=== Example 7: Defects ===");

    let defect = catch_defect(|| {
        Safe::new(|| Err::<(), _>("disk full"))
            .catch(|_fault| -> String { panic!("error table not loaded") })
            .retry(RetryPolicy::times(3))
            .run()
    });

    match defect {
        Ok(outcome) => println!("  Unexpected outcome: {:?}", outcome),
        Err(defect) => println!("  Defect: {}", defect),
    }
}

#[tokio::main]
async fn main() {
    // Run with `--features tracing` to see retry and defect events.
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    println!("======================================");
    println!("       Retry Patterns Example         ");
    println!("======================================");

    example_capture();
    example_blocking_retry();
    example_backoff_strategies();
    example_async_retry().await;
    example_conditional_retry().await;
    example_timeout().await;
    example_defect();

    println!("\n======================================");
    println!("           Examples Complete           ");
    println!("======================================");
}
