// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供任务队列接口及其两种实现：
/// 基于互斥锁的非阻塞队列和基于消息传递的阻塞队列
pub mod actor_queue;
pub mod locking_queue;
pub mod task_queue;

pub use actor_queue::ActorTaskQueue;
pub use locking_queue::LockingTaskQueue;
pub use task_queue::{PopMode, QueueError, TaskQueue};
