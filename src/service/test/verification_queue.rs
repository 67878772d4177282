use super::*;

use futures::future::join_all;

use crate::error::queue::QueueError;

/// Tests that queued checks reach the upstream API in enqueue order.
///
/// Expected: calls recorded in the same order the tasks were queued
#[tokio::test]
async fn processes_tasks_in_fifo_order() -> Result<(), AppError> {
    let api = Arc::new(FakeOwnershipApi::default());
    api.set_count("0x1", 1);
    api.set_count("0x2", 2);
    api.set_count("0x3", 3);
    let queue = started_queue(&api).await;

    let results = join_all(
        ["0x1", "0x2", "0x3"]
            .into_iter()
            .map(|wallet| queue.enqueue(wallet, COLLECTION)),
    )
    .await;

    let counts = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(api.count_calls(), vec!["0x1", "0x2", "0x3"]);

    Ok(())
}

/// Tests that an upstream failure resolves the task with zero.
///
/// Expected: Ok(0), not an error
#[tokio::test]
async fn upstream_failure_resolves_zero() -> Result<(), AppError> {
    let api = Arc::new(FakeOwnershipApi::default());
    api.set_count("0xwallet", 9);
    api.fail_wallet("0xwallet");
    let queue = started_queue(&api).await;

    assert_eq!(queue.enqueue("0xwallet", COLLECTION).await?, 0);

    Ok(())
}

/// Tests that starting an already running queue is a no-op.
///
/// Expected: queue keeps running and each task is processed exactly once
#[tokio::test]
async fn start_is_idempotent() -> Result<(), AppError> {
    let api = Arc::new(FakeOwnershipApi::default());
    api.set_count("0xwallet", 2);
    let queue = started_queue(&api).await;

    queue.start().await;
    assert!(queue.is_running().await);

    assert_eq!(queue.enqueue("0xwallet", COLLECTION).await?, 2);
    assert_eq!(api.count_calls().len(), 1);

    Ok(())
}

/// Tests that tasks queued before the worker starts are processed once it does.
///
/// Expected: the pending caller receives its count after `start`
#[tokio::test]
async fn tasks_wait_for_start() -> Result<(), AppError> {
    let api = Arc::new(FakeOwnershipApi::default());
    api.set_count("0xwallet", 6);
    let queue = Arc::new(VerificationQueue::new(
        Arc::new(ownership_client(&api, 500)),
        Duration::ZERO,
    ));
    assert!(!queue.is_running().await);

    let pending = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.enqueue("0xwallet", COLLECTION).await })
    };
    tokio::task::yield_now().await;
    assert!(api.count_calls().is_empty());

    queue.start().await;
    let count = pending.await.unwrap()?;

    assert_eq!(count, 6);

    Ok(())
}

/// Tests that the worker spaces upstream calls by the configured interval.
///
/// Expected: three calls take at least two intervals
#[tokio::test(start_paused = true)]
async fn enforces_call_interval() -> Result<(), AppError> {
    let api = Arc::new(FakeOwnershipApi::default());
    let queue = VerificationQueue::new(
        Arc::new(ownership_client(&api, 500)),
        Duration::from_millis(250),
    );
    queue.start().await;

    let started = tokio::time::Instant::now();
    let results = join_all(
        ["0x1", "0x2", "0x3"]
            .into_iter()
            .map(|wallet| queue.enqueue(wallet, COLLECTION)),
    )
    .await;

    assert!(results.iter().all(|result| result.is_ok()));
    assert!(started.elapsed() >= Duration::from_millis(500));

    Ok(())
}

/// Tests that a stopped queue rejects new work.
///
/// Expected: `is_running` false and `QueueError::Closed` on enqueue
#[tokio::test]
async fn shutdown_rejects_new_tasks() {
    let api = Arc::new(FakeOwnershipApi::default());
    let queue = started_queue(&api).await;

    queue.shutdown().await;

    assert!(!queue.is_running().await);
    assert!(matches!(
        queue.enqueue("0xwallet", COLLECTION).await,
        Err(QueueError::Closed)
    ));
    assert!(api.count_calls().is_empty());
}
