// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskId, TaskInfo};
use crate::queue::task_queue::{PopMode, QueueError, TaskQueue};
use crate::utils::id_generator::assign_task_id;
use crate::utils::metrics;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::debug;

const STRATEGY: &str = "locking";

/// 基于互斥锁的任务队列
///
/// 单把排他锁保护整个有序序列，每个操作在其完整执行期间持有锁，
/// 锁从不跨越 `.await`。
#[derive(Default)]
pub struct LockingTaskQueue {
    tasks: Mutex<VecDeque<Task>>,
}

impl LockingTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 非阻塞出队
    ///
    /// 队列为空时立即返回 `None`。
    pub fn try_pop(&self) -> Option<Task> {
        let mut tasks = self.tasks.lock();
        debug!("queue called pop");

        let Some(task) = tasks.pop_front() else {
            debug!("queue called pop with empty queue");
            return None;
        };

        metrics::record_pop(STRATEGY, tasks.len());
        Some(task)
    }

    /// 当前排队任务数量
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

#[async_trait]
impl TaskQueue for LockingTaskQueue {
    async fn push(&self, task: Task) -> Result<TaskId, QueueError> {
        // Generate the id before taking the lock so the critical section stays short.
        let id = assign_task_id();
        let task = task.with_id(id.clone());

        let mut tasks = self.tasks.lock();
        debug!(task_id = %id, "queue called enqueue");
        tasks.push_back(task);
        metrics::record_push(STRATEGY, tasks.len());

        Ok(id)
    }

    async fn pop(&self) -> Result<Option<Task>, QueueError> {
        Ok(self.try_pop())
    }

    async fn list(&self) -> Result<Vec<TaskInfo>, QueueError> {
        let tasks = self.tasks.lock();
        debug!(queued = tasks.len(), "queue called get list of tasks");
        Ok(tasks.iter().map(Task::info).collect())
    }

    async fn get(&self, id: &TaskId) -> Result<Option<TaskInfo>, QueueError> {
        let tasks = self.tasks.lock();
        debug!(task_id = %id, "queue called get task by id");

        let found = tasks.iter().find(|task| task.id() == id).map(Task::info);
        if found.is_some() {
            debug!(task_id = %id, "get task by id - found");
        }
        Ok(found)
    }

    fn pop_mode(&self) -> PopMode {
        PopMode::Immediate
    }
}

#[cfg(test)]
#[path = "locking_queue_test.rs"]
mod tests;
