// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::TaskId;
use crate::utils::errors::IdGenerationError;
use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::error;
use uuid::Builder;

/// 生成随机任务标识
///
/// 从操作系统熵源读取 16 字节并格式化为 v4 UUID。
///
/// # 返回值
///
/// * `Ok(TaskId)` - 新的任务标识
/// * `Err(IdGenerationError)` - 熵源读取失败
pub fn generate_task_id() -> Result<TaskId, IdGenerationError> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| IdGenerationError::Entropy(e.to_string()))?;

    Ok(TaskId::from(Builder::from_random_bytes(bytes).into_uuid()))
}

/// 为入队任务分配标识
///
/// 生成失败时记录错误并返回空标识，入队操作本身不会因此失败。
pub fn assign_task_id() -> TaskId {
    match generate_task_id() {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to generate task id, continuing with empty id: {}", e);
            TaskId::default()
        }
    }
}
