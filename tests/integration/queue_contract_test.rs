// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 队列契约测试
//!
//! 同一组场景分别在互斥锁队列与消息传递队列上运行，
//! 仅出队为空时的行为按 `PopMode` 区分。

use super::helpers::noop_task;
use seqexec::domain::models::task::TaskId;
use seqexec::queue::{ActorTaskQueue, LockingTaskQueue, PopMode, TaskQueue};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio::time::timeout;

async fn assert_example_scenario(queue: &dyn TaskQueue) {
    let a = queue.push(noop_task()).await.unwrap();
    let b = queue.push(noop_task()).await.unwrap();
    let c = queue.push(noop_task()).await.unwrap();

    let listed: Vec<TaskId> = queue
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|info| info.id)
        .collect();
    assert_eq!(listed, vec![a.clone(), b.clone(), c.clone()]);

    for expected in [&a, &b, &c] {
        let task = queue.pop().await.unwrap().expect("queued task");
        assert_eq!(task.id(), expected);
    }

    match queue.pop_mode() {
        PopMode::Immediate => {
            let started = Instant::now();
            assert!(queue.pop().await.unwrap().is_none());
            assert!(started.elapsed() < Duration::from_secs(1));
        }
        PopMode::Blocking => {
            assert!(timeout(Duration::from_millis(200), queue.pop()).await.is_err());

            let d = queue.push(noop_task()).await.unwrap();
            let task = timeout(Duration::from_secs(1), queue.pop())
                .await
                .expect("pop should resume after push")
                .unwrap()
                .expect("queued task");
            assert_eq!(task.id(), &d);
        }
    }
}

async fn assert_get_projects_queued_tasks(queue: &dyn TaskQueue) {
    let id = queue.push(noop_task()).await.unwrap();

    let info = queue.get(&id).await.unwrap().expect("task should be found");
    assert_eq!(info.id, id);
    assert!(queue.get(&TaskId::from("not-a-task")).await.unwrap().is_none());

    queue.pop().await.unwrap();
    assert!(queue.get(&id).await.unwrap().is_none());
}

async fn assert_list_is_snapshot(queue: &dyn TaskQueue) {
    let first = queue.push(noop_task()).await.unwrap();
    queue.push(noop_task()).await.unwrap();

    let snapshot = queue.list().await.unwrap();
    let fetched = queue.get(&first).await.unwrap().unwrap();

    queue.pop().await.unwrap();
    queue.pop().await.unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].id, first);
    assert_eq!(fetched.id, first);
    assert!(queue.list().await.unwrap().is_empty());
}

async fn assert_ids_are_unique(queue: &dyn TaskQueue) {
    let mut ids = HashSet::new();
    for _ in 0..500 {
        let id = queue.push(noop_task()).await.unwrap();
        assert!(!id.is_empty());
        assert!(ids.insert(id));
    }
    assert_eq!(queue.list().await.unwrap().len(), 500);
}

#[tokio::test]
async fn test_example_scenario_locking() {
    assert_example_scenario(&LockingTaskQueue::new()).await;
}

#[tokio::test]
async fn test_example_scenario_actor() {
    assert_example_scenario(&ActorTaskQueue::new(8)).await;
}

#[tokio::test]
async fn test_get_projects_queued_tasks_locking() {
    assert_get_projects_queued_tasks(&LockingTaskQueue::new()).await;
}

#[tokio::test]
async fn test_get_projects_queued_tasks_actor() {
    assert_get_projects_queued_tasks(&ActorTaskQueue::new(8)).await;
}

#[tokio::test]
async fn test_list_is_snapshot_locking() {
    assert_list_is_snapshot(&LockingTaskQueue::new()).await;
}

#[tokio::test]
async fn test_list_is_snapshot_actor() {
    assert_list_is_snapshot(&ActorTaskQueue::new(8)).await;
}

#[tokio::test]
async fn test_ids_are_unique_locking() {
    assert_ids_are_unique(&LockingTaskQueue::new()).await;
}

#[tokio::test]
async fn test_ids_are_unique_actor() {
    assert_ids_are_unique(&ActorTaskQueue::new(8)).await;
}
