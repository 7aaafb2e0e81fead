// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供顺序执行队列任务的后台执行器，以及队列与执行器的装配函数
pub mod executor;
pub mod manager;
pub mod worker;

pub use worker::Worker;
