// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{ExecutorSettings, QueueStrategy, Settings};
use crate::queue::actor_queue::ActorTaskQueue;
use crate::queue::locking_queue::LockingTaskQueue;
use crate::queue::task_queue::TaskQueue;
use crate::utils::errors::WorkerError;
use crate::utils::metrics;
use crate::workers::executor::TaskExecutor;
use crate::workers::worker::Worker;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 后台执行器句柄
pub struct ExecutorHandle {
    name: String,
    handle: JoinHandle<Result<(), WorkerError>>,
}

impl ExecutorHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 执行器循环是否已退出
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 等待执行器自行退出
    ///
    /// 执行器只有在队列不可用时才会退出，因此该调用通常不会返回。
    pub async fn join(self) -> Result<(), WorkerError> {
        self.handle
            .await
            .map_err(|e| WorkerError::InternalError(e.to_string()))?
    }

    /// 停止执行器并等待其退出
    ///
    /// 正在执行的任务会在下一个挂起点被取消。
    pub async fn shutdown(self) {
        info!(executor = %self.name, "Shutting down task executor...");
        self.handle.abort();

        match self.handle.await {
            Ok(Ok(())) => info!(executor = %self.name, "Task executor finished"),
            Ok(Err(e)) => warn!(executor = %self.name, "Task executor had already stopped: {}", e),
            Err(e) if e.is_cancelled() => info!(executor = %self.name, "Task executor shut down successfully"),
            Err(e) => error!(executor = %self.name, "Task executor panicked: {}", e),
        }
    }
}

/// 启动消费指定队列的后台执行器
///
/// 必须在 Tokio 运行时中调用。
pub fn spawn_executor<Q>(queue: Arc<Q>, settings: &ExecutorSettings) -> ExecutorHandle
where
    Q: TaskQueue + ?Sized + 'static,
{
    metrics::describe_metrics();

    let executor = TaskExecutor::new(queue, settings);
    let name = executor.name().to_string();
    let handle = tokio::spawn(async move { executor.run().await });

    ExecutorHandle { name, handle }
}

/// 创建消息传递队列并启动其执行器
pub fn new_actor_queue_executor(settings: &Settings) -> (Arc<ActorTaskQueue>, ExecutorHandle) {
    let queue = Arc::new(ActorTaskQueue::from_settings(&settings.queue));
    let handle = spawn_executor(queue.clone(), &settings.executor);
    (queue, handle)
}

/// 创建互斥锁队列并启动其执行器
pub fn new_locking_queue_executor(settings: &Settings) -> (Arc<LockingTaskQueue>, ExecutorHandle) {
    let queue = Arc::new(LockingTaskQueue::new());
    let handle = spawn_executor(queue.clone(), &settings.executor);
    (queue, handle)
}

/// 按配置的策略创建队列并启动其执行器
///
/// # 参数
///
/// * `settings` - 应用配置，`queue.strategy` 决定队列实现
///
/// # 返回值
///
/// 返回队列接口与执行器句柄
pub fn new_queue_executor(settings: &Settings) -> (Arc<dyn TaskQueue>, ExecutorHandle) {
    info!(strategy = ?settings.queue.strategy, "Starting task queue executor");

    match settings.queue.strategy {
        QueueStrategy::Actor => {
            let (queue, handle) = new_actor_queue_executor(settings);
            let queue: Arc<dyn TaskQueue> = queue;
            (queue, handle)
        }
        QueueStrategy::Locking => {
            let (queue, handle) = new_locking_queue_executor(settings);
            let queue: Arc<dyn TaskQueue> = queue;
            (queue, handle)
        }
    }
}
