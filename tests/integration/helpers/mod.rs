// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use parking_lot::Mutex;
use seqexec::domain::models::task::{Executable, Task};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Barrier};

pub type Operation = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

pub fn operation<F>(future: F) -> Operation
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::pin(future)
}

/// 并发执行一组操作
///
/// 所有操作先在屏障处集合，再同时放行，尽可能制造交错。
/// 返回每个操作的结果，并断言没有操作丢失。
pub async fn run_parallel_operations(operations: Vec<Operation>) -> Vec<anyhow::Result<()>> {
    let expected = operations.len();
    let barrier = Arc::new(Barrier::new(expected + 1));

    let mut handles = Vec::with_capacity(expected);
    for operation in operations {
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            operation.await
        }));
    }

    // Release every operation at once.
    barrier.wait().await;

    let mut results = Vec::with_capacity(expected);
    for handle in handles {
        results.push(handle.await.expect("parallel operation panicked"));
    }

    assert_eq!(results.len(), expected);
    results
}

pub fn noop_task() -> Task {
    Task::from_fn(|| async { Ok(()) })
}

/// 把自身的值写入共享集合并通知完成的测试任务
pub struct CollectingExecutable {
    value: usize,
    collected: Arc<Mutex<Vec<usize>>>,
    done: mpsc::UnboundedSender<usize>,
}

#[async_trait]
impl Executable for CollectingExecutable {
    async fn execute(&self) -> anyhow::Result<()> {
        self.collected.lock().push(self.value);
        self.done.send(self.value).ok();
        Ok(())
    }
}

pub fn collecting_task(
    value: usize,
    collected: Arc<Mutex<Vec<usize>>>,
    done: mpsc::UnboundedSender<usize>,
) -> Task {
    Task::new(CollectingExecutable {
        value,
        collected,
        done,
    })
}

/// 等待指定数量的完成通知，超时返回 `false`
pub async fn wait_for_completions(
    done: &mut mpsc::UnboundedReceiver<usize>,
    count: usize,
    timeout: Duration,
) -> bool {
    tokio::time::timeout(timeout, async {
        for _ in 0..count {
            if done.recv().await.is_none() {
                return false;
            }
        }
        true
    })
    .await
    .unwrap_or(false)
}
