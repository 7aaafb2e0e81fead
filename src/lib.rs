// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理队列策略、执行器和日志的配置设置与环境变量
pub mod config;

/// 领域模块
///
/// 包含任务实体与可执行能力接口
pub mod domain;

/// 队列模块
///
/// 实现任务队列接口及其互斥锁、消息传递两种实现
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现顺序消费队列的后台执行器
pub mod workers;
