// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// 任务唯一标识符
///
/// 由队列在入队时分配，调用方创建任务时不携带标识。
/// 空字符串表示标识生成降级（见 [`crate::utils::id_generator::assign_task_id`]）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// 是否为空标识（未分配或生成降级）
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        TaskId(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        TaskId(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        TaskId(id.to_string())
    }
}

/// 可执行能力
///
/// 任务对外暴露的唯一操作。队列与执行器只关心执行成功与否，
/// 从不检查错误的具体类型。
#[async_trait]
pub trait Executable: Send + Sync {
    /// 执行任务
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 执行成功
    /// * `Err(anyhow::Error)` - 执行失败，由执行器记录日志，不会重试
    async fn execute(&self) -> anyhow::Result<()>;
}

/// 基于闭包的可执行能力适配器
pub struct FnExecutable<F>(F);

impl<F> FnExecutable<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> Executable for FnExecutable<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn execute(&self) -> anyhow::Result<()> {
        (self.0)().await
    }
}

/// 任务实体
///
/// 创建后不可变：标识只能由队列在入队时写入，可执行能力在整个
/// 生命周期内共享且不可替换。出队后交给执行器，队列不再跟踪。
pub struct Task {
    id: TaskId,
    executable: Arc<dyn Executable>,
}

impl Task {
    /// 创建一个尚未分配标识的任务
    pub fn new<E>(executable: E) -> Self
    where
        E: Executable + 'static,
    {
        Self {
            id: TaskId::default(),
            executable: Arc::new(executable),
        }
    }

    /// 由闭包创建任务
    ///
    /// ```ignore
    /// let task = Task::from_fn(|| async { Ok(()) });
    /// ```
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::new(FnExecutable::new(f))
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// 复制任务并写入队列分配的标识
    pub(crate) fn with_id(self, id: TaskId) -> Self {
        Self {
            id,
            executable: self.executable,
        }
    }

    /// 生成只读投影，不包含可执行能力
    pub fn info(&self) -> TaskInfo {
        TaskInfo {
            id: self.id.clone(),
        }
    }

    /// 执行任务的可执行能力
    pub async fn execute(&self) -> anyhow::Result<()> {
        self.executable.execute().await
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// 任务只读投影
///
/// 每次 `list`/`get` 调用都会生成新的值拷贝，与队列内部存储互不共享。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// 任务唯一标识符
    pub id: TaskId,
}
