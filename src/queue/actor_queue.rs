// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::QueueSettings;
use crate::domain::models::task::{Task, TaskId, TaskInfo};
use crate::queue::task_queue::{PopMode, QueueError, TaskQueue};
use crate::utils::errors::{install_panic_backtrace_hook, PanicReport};
use crate::utils::id_generator::assign_task_id;
use crate::utils::metrics;
use async_trait::async_trait;
use futures::FutureExt;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

const STRATEGY: &str = "actor";

/// 管理类请求：入队、列表、按标识查询
///
/// 每个请求携带自己类型化的应答通道，不存在未知请求或应答类型不匹配的情况。
enum ManagementRequest {
    Push {
        task: Task,
        reply: oneshot::Sender<TaskId>,
    },
    List {
        reply: oneshot::Sender<Vec<TaskInfo>>,
    },
    Get {
        id: TaskId,
        reply: oneshot::Sender<Option<TaskInfo>>,
    },
    /// 让控制循环在处理时 panic
    #[cfg(test)]
    Crash,
}

impl ManagementRequest {
    fn kind(&self) -> &'static str {
        match self {
            ManagementRequest::Push { .. } => "push",
            ManagementRequest::List { .. } => "list",
            ManagementRequest::Get { .. } => "get",
            #[cfg(test)]
            ManagementRequest::Crash => "crash",
        }
    }
}

/// 出队请求，走独立通道
struct PopRequest {
    reply: oneshot::Sender<Task>,
}

/// 基于消息传递的任务队列
///
/// 有序序列由单个控制循环独占，所有操作都以请求/应答消息的形式
/// 经通道送达控制循环处理。句柄可廉价克隆，所有句柄被丢弃后控制循环退出。
///
/// 必须在 Tokio 运行时中创建。
#[derive(Clone)]
pub struct ActorTaskQueue {
    management_tx: mpsc::Sender<ManagementRequest>,
    pop_tx: mpsc::Sender<PopRequest>,
}

impl ActorTaskQueue {
    /// 创建队列并启动控制循环
    ///
    /// # 参数
    ///
    /// * `mailbox_capacity` - 管理请求通道容量
    pub fn new(mailbox_capacity: usize) -> Self {
        let (management_tx, management_rx) = mpsc::channel(mailbox_capacity.max(1));
        let (pop_tx, pop_rx) = mpsc::channel(1);
        install_panic_backtrace_hook();

        let control_loop = ControlLoop {
            tasks: VecDeque::new(),
            management_rx,
            pop_rx,
        };
        tokio::spawn(control_loop.run_guarded());

        Self {
            management_tx,
            pop_tx,
        }
    }

    pub fn from_settings(settings: &QueueSettings) -> Self {
        Self::new(settings.mailbox_capacity)
    }

    /// 阻塞出队
    ///
    /// 队列为空时挂起，直到有任务入队。队列本身不提供超时，
    /// 调用方可用 `tokio::time::timeout` 竞争；被取消的请求不会丢失任务。
    pub async fn pop_blocking(&self) -> Result<Task, QueueError> {
        let (reply, response) = oneshot::channel();
        self.pop_tx
            .send(PopRequest { reply })
            .await
            .map_err(|_| QueueError::Closed)?;
        response.await.map_err(|_| QueueError::Closed)
    }

    /// 控制循环是否仍在接收请求
    pub fn is_running(&self) -> bool {
        !self.management_tx.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ManagementRequest,
    ) -> Result<T, QueueError> {
        let (reply, response) = oneshot::channel();
        self.management_tx
            .send(build(reply))
            .await
            .map_err(|_| QueueError::Closed)?;
        response.await.map_err(|_| QueueError::Closed)
    }
}

#[async_trait]
impl TaskQueue for ActorTaskQueue {
    async fn push(&self, task: Task) -> Result<TaskId, QueueError> {
        self.request(|reply| ManagementRequest::Push { task, reply })
            .await
    }

    async fn pop(&self) -> Result<Option<Task>, QueueError> {
        self.pop_blocking().await.map(Some)
    }

    async fn list(&self) -> Result<Vec<TaskInfo>, QueueError> {
        self.request(|reply| ManagementRequest::List { reply }).await
    }

    async fn get(&self, id: &TaskId) -> Result<Option<TaskInfo>, QueueError> {
        let id = id.clone();
        self.request(|reply| ManagementRequest::Get { id, reply })
            .await
    }

    fn pop_mode(&self) -> PopMode {
        PopMode::Blocking
    }
}

/// 控制循环，序列的唯一所有者
struct ControlLoop {
    tasks: VecDeque<Task>,
    management_rx: mpsc::Receiver<ManagementRequest>,
    pop_rx: mpsc::Receiver<PopRequest>,
}

impl ControlLoop {
    /// 运行控制循环并捕获 panic
    ///
    /// panic 后循环不再恢复，通道接收端随之释放，后续调用得到 `QueueError::Closed`。
    async fn run_guarded(self) {
        if let Err(panic) = AssertUnwindSafe(self.run()).catch_unwind().await {
            let report = PanicReport::capture(panic.as_ref());
            error!(
                backtrace = %report.backtrace,
                "Task queue control loop panicked, queue is no longer serviced: {}",
                report.message
            );
        }
    }

    async fn run(mut self) {
        info!("Task queue control loop started");

        loop {
            debug!(queued = self.tasks.len(), "queue iteration, awaiting requests");

            // Pop requests are only accepted while something is queued; otherwise
            // they stay pending in the channel and the popping caller waits.
            // Among ready branches select! picks at random, so neither side has priority.
            tokio::select! {
                request = self.pop_rx.recv(), if !self.tasks.is_empty() => match request {
                    Some(request) => self.handle_pop(request),
                    None => break,
                },
                request = self.management_rx.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
            }
        }

        info!("Task queue control loop stopped, all handles dropped");
    }

    #[instrument(level = "debug", skip_all, fields(strategy = STRATEGY, queued = self.tasks.len()))]
    fn handle_pop(&mut self, request: PopRequest) {
        debug!("queue called pop");

        if request.reply.is_closed() {
            debug!("pop requester went away, request discarded");
            return;
        }

        let Some(task) = self.tasks.pop_front() else {
            error!("queue called pop with empty queue, request dropped");
            return;
        };

        match request.reply.send(task) {
            Ok(()) => metrics::record_pop(STRATEGY, self.tasks.len()),
            Err(task) => {
                warn!(task_id = %task.id(), "pop requester went away, task returned to queue head");
                self.tasks.push_front(task);
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(strategy = STRATEGY, kind = request.kind()))]
    fn handle_request(&mut self, request: ManagementRequest) {
        debug!("queue received request");

        match request {
            ManagementRequest::Push { task, reply } => {
                let id = assign_task_id();
                debug!(task_id = %id, "queue called enqueue");

                self.tasks.push_back(task.with_id(id.clone()));
                metrics::record_push(STRATEGY, self.tasks.len());

                if reply.send(id).is_err() {
                    debug!("push requester went away before receiving task id");
                }
            }
            ManagementRequest::List { reply } => {
                debug!("queue called get list of tasks");
                let snapshot = self.tasks.iter().map(Task::info).collect();
                if reply.send(snapshot).is_err() {
                    debug!("list requester went away before receiving tasks");
                }
            }
            ManagementRequest::Get { id, reply } => {
                debug!(task_id = %id, "queue called get task by id");
                let found = self.tasks.iter().find(|task| *task.id() == id).map(Task::info);
                if found.is_some() {
                    debug!(task_id = %id, "get task by id - found");
                }
                if reply.send(found).is_err() {
                    debug!("get requester went away before receiving task");
                }
            }
            #[cfg(test)]
            ManagementRequest::Crash => panic!("control loop crash requested"),
        }
    }
}

#[cfg(test)]
#[path = "actor_queue_test.rs"]
mod tests;
