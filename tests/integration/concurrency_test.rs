// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{noop_task, operation, run_parallel_operations, Operation};
use seqexec::queue::{ActorTaskQueue, LockingTaskQueue, TaskQueue};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const PUSHERS: usize = 4;
const PUSHES_PER_PUSHER: usize = 50;
const OPERATIONS: usize = 100;

async fn assert_concurrent_pushes_are_not_lost(queue: Arc<dyn TaskQueue>) {
    let operations: Vec<Operation> = (0..PUSHERS)
        .map(|_| {
            let queue = queue.clone();
            operation(async move {
                for _ in 0..PUSHES_PER_PUSHER {
                    queue.push(noop_task()).await?;
                }
                Ok(())
            })
        })
        .collect();

    for result in run_parallel_operations(operations).await {
        result.unwrap();
    }

    // Drain through pop and count what comes out.
    let expected = PUSHERS * PUSHES_PER_PUSHER;
    let mut ids = HashSet::new();
    for _ in 0..expected {
        let task = tokio::time::timeout(Duration::from_secs(1), queue.pop())
            .await
            .expect("pushed task should be available")
            .unwrap()
            .expect("pushed task should be available");
        assert!(ids.insert(task.id().clone()), "duplicate id {}", task.id());
    }

    assert_eq!(ids.len(), expected);
    assert!(queue.list().await.unwrap().is_empty());
}

/// Every operation pushes before it pops, so a pop never meets an empty queue.
async fn assert_mixed_operations_complete(queue: Arc<dyn TaskQueue>) {
    let operations: Vec<Operation> = (0..OPERATIONS)
        .map(|_| {
            let queue = queue.clone();
            operation(async move {
                let id = queue.push(noop_task()).await?;
                queue.get(&id).await?;
                queue.list().await?;
                let popped = queue.pop().await?;
                anyhow::ensure!(popped.is_some(), "pop returned no task");
                Ok(())
            })
        })
        .collect();

    let results = tokio::time::timeout(
        Duration::from_secs(5),
        run_parallel_operations(operations),
    )
    .await
    .expect("parallel operations should complete");

    for result in results {
        result.unwrap();
    }
    assert!(queue.list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_concurrent_pushes_are_not_lost_locking() {
    assert_concurrent_pushes_are_not_lost(Arc::new(LockingTaskQueue::new())).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_concurrent_pushes_are_not_lost_actor() {
    assert_concurrent_pushes_are_not_lost(Arc::new(ActorTaskQueue::new(4))).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_mixed_operations_complete_locking() {
    assert_mixed_operations_complete(Arc::new(LockingTaskQueue::new())).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_mixed_operations_complete_actor() {
    assert_mixed_operations_complete(Arc::new(ActorTaskQueue::new(4))).await;
}
