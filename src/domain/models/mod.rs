// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体：
/// - 任务（task）：带有队列分配标识的可执行工作单元
/// - 任务投影（TaskInfo）：不含可执行能力的只读视图
pub mod task;
