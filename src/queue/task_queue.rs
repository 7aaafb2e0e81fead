// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskId, TaskInfo};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// 队列错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// 控制循环已退出，请求无法送达或无法得到应答
    #[error("Queue closed")]
    Closed,
}

/// 出队语义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopMode {
    /// 队列为空时立即返回 `None`，需要阻塞语义的调用方必须轮询
    Immediate,
    /// 队列为空时挂起调用方，直到有任务入队
    Blocking,
}

impl fmt::Display for PopMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PopMode::Immediate => write!(f, "immediate"),
            PopMode::Blocking => write!(f, "blocking"),
        }
    }
}

/// 任务队列特质
///
/// 两种实现共享同一外部语义，唯一差别是 [`TaskQueue::pop`]，
/// 由 [`TaskQueue::pop_mode`] 明确声明。
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// 入队任务
    ///
    /// 任务被复制并分配新的标识后追加到队尾。
    ///
    /// # 返回值
    ///
    /// * `Ok(TaskId)` - 分配的标识，空标识表示标识生成降级
    /// * `Err(QueueError)` - 队列已关闭
    async fn push(&self, task: Task) -> Result<TaskId, QueueError>;

    /// 出队任务
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Task))` - 队首任务
    /// * `Ok(None)` - 队列为空（仅 [`PopMode::Immediate`]）
    /// * `Err(QueueError)` - 队列已关闭
    async fn pop(&self) -> Result<Option<Task>, QueueError>;

    /// 按 FIFO 顺序列出当前所有任务的投影快照
    async fn list(&self) -> Result<Vec<TaskInfo>, QueueError>;

    /// 按标识查找任务投影，未找到时返回 `None`
    async fn get(&self, id: &TaskId) -> Result<Option<TaskInfo>, QueueError>;

    /// 当前实现的出队语义
    fn pop_mode(&self) -> PopMode;
}

#[async_trait]
impl<T: TaskQueue + ?Sized> TaskQueue for Arc<T> {
    async fn push(&self, task: Task) -> Result<TaskId, QueueError> {
        (**self).push(task).await
    }

    async fn pop(&self) -> Result<Option<Task>, QueueError> {
        (**self).pop().await
    }

    async fn list(&self) -> Result<Vec<TaskInfo>, QueueError> {
        (**self).list().await
    }

    async fn get(&self, id: &TaskId) -> Result<Option<TaskInfo>, QueueError> {
        (**self).get(id).await
    }

    fn pop_mode(&self) -> PopMode {
        (**self).pop_mode()
    }
}
