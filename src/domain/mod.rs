// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 包含任务模型及其可执行能力抽象，不依赖队列的具体实现。
pub mod models;
