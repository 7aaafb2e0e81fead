// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供错误类型、任务标识生成、日志与指标等通用功能
pub mod errors;
pub mod id_generator;
pub mod metrics;
pub mod telemetry;
