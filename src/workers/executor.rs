// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ExecutorSettings;
use crate::domain::models::task::{Task, TaskId};
use crate::queue::task_queue::{QueueError, TaskQueue};
use crate::utils::errors::{install_panic_backtrace_hook, PanicReport, WorkerError};
use crate::utils::metrics;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// 单个任务的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// 执行成功
    Succeeded,
    /// 可执行能力返回错误，任务终止，不重试也不重新入队
    Failed(String),
    /// 执行过程中发生 panic，已被捕获
    Panicked(String),
}

impl ExecutionOutcome {
    fn label(&self) -> &'static str {
        match self {
            ExecutionOutcome::Succeeded => "succeeded",
            ExecutionOutcome::Failed(_) => "failed",
            ExecutionOutcome::Panicked(_) => "panicked",
        }
    }
}

/// 单次轮询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// 取到任务并执行完毕
    Executed {
        task_id: TaskId,
        outcome: ExecutionOutcome,
    },
    /// 队列为空，没有取到任务
    Idle,
}

/// 顺序任务执行器
///
/// 队列的唯一专职消费者：出队、执行、记录结果，然后继续下一轮。
/// 对非阻塞队列，取不到任务时退避 `idle_backoff` 后重试；
/// 对阻塞队列，出队本身会挂起直到有任务。
pub struct TaskExecutor<Q: ?Sized> {
    name: String,
    queue: Arc<Q>,
    idle_backoff: Duration,
}

impl<Q> TaskExecutor<Q>
where
    Q: TaskQueue + ?Sized,
{
    /// 创建新的执行器实例
    ///
    /// # 参数
    ///
    /// * `queue` - 要消费的任务队列
    /// * `settings` - 执行器配置
    pub fn new(queue: Arc<Q>, settings: &ExecutorSettings) -> Self {
        install_panic_backtrace_hook();
        Self {
            name: settings.name.clone(),
            queue,
            idle_backoff: settings.idle_backoff(),
        }
    }

    /// 执行一次轮询
    ///
    /// # 返回值
    ///
    /// * `Ok(PollOutcome)` - 本轮的执行情况，任务失败也属于正常返回
    /// * `Err(QueueError)` - 队列不可用
    pub async fn poll_once(&self) -> Result<PollOutcome, QueueError> {
        match self.queue.pop().await? {
            Some(task) => {
                let outcome = self.execute(&task).await;
                Ok(PollOutcome::Executed {
                    task_id: task.id().clone(),
                    outcome,
                })
            }
            None => Ok(PollOutcome::Idle),
        }
    }

    #[instrument(skip(self, task), fields(executor = %self.name, task_id = %task.id()))]
    async fn execute(&self, task: &Task) -> ExecutionOutcome {
        info!("found task, executing");

        let outcome = match AssertUnwindSafe(task.execute()).catch_unwind().await {
            Ok(Ok(())) => {
                info!("finished execution of task");
                ExecutionOutcome::Succeeded
            }
            Ok(Err(e)) => {
                error!("finished execution of task with error: {:#}", e);
                ExecutionOutcome::Failed(format!("{:#}", e))
            }
            Err(panic) => {
                let report = PanicReport::capture(panic.as_ref());
                error!(
                    backtrace = %report.backtrace,
                    "task execution panicked: {}", report.message
                );
                ExecutionOutcome::Panicked(report.message)
            }
        };

        metrics::record_execution(outcome.label());
        outcome
    }
}

#[async_trait]
impl<Q> Worker for TaskExecutor<Q>
where
    Q: TaskQueue + ?Sized,
{
    async fn run(&self) -> Result<(), WorkerError> {
        info!(
            executor = %self.name,
            pop_mode = %self.queue.pop_mode(),
            "Task executor started"
        );

        loop {
            match self.poll_once().await {
                Ok(PollOutcome::Executed { .. }) => {}
                Ok(PollOutcome::Idle) => {
                    debug!("returned no task, waiting for task to appear");
                    sleep(self.idle_backoff).await;
                }
                Err(e) => {
                    error!(executor = %self.name, "Task executor stopping, queue unavailable: {}", e);
                    return Err(WorkerError::QueueClosed(e.to_string()));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
