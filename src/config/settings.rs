// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_MAILBOX_CAPACITY: usize = 32;
const DEFAULT_IDLE_BACKOFF_MS: u64 = 1000;
const DEFAULT_EXECUTOR_NAME: &str = "task-executor";
const DEFAULT_LOG_FILTER: &str = "info,seqexec=debug";

/// 应用程序配置设置
///
/// 包含队列、执行器和日志等所有配置项
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// 队列配置
    pub queue: QueueSettings,
    /// 执行器配置
    pub executor: ExecutorSettings,
    /// 日志配置
    pub logging: LoggingSettings,
}

/// 队列实现策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueStrategy {
    /// 消息传递实现，出队阻塞
    #[default]
    Actor,
    /// 互斥锁实现，出队非阻塞
    Locking,
}

/// 队列配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    /// 队列实现策略 (actor, locking)
    pub strategy: QueueStrategy,
    /// 管理请求通道容量，仅 actor 策略使用
    pub mailbox_capacity: usize,
}

/// 执行器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorSettings {
    /// 执行器名称，用于日志
    pub name: String,
    /// 队列为空时的退避时间（毫秒）
    pub idle_backoff_ms: u64,
}

impl ExecutorSettings {
    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_backoff_ms)
    }
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 默认日志过滤规则，`RUST_LOG` 优先
    pub filter: String,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            strategy: QueueStrategy::default(),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXECUTOR_NAME.to_string(),
            idle_backoff_ms: DEFAULT_IDLE_BACKOFF_MS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{SEQEXEC_ENVIRONMENT}`
    /// 以及 `SEQEXEC__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败或取值非法
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("SEQEXEC_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("queue.strategy", "actor")?
            .set_default("queue.mailbox_capacity", DEFAULT_MAILBOX_CAPACITY as u64)?
            .set_default("executor.name", DEFAULT_EXECUTOR_NAME)?
            .set_default("executor.idle_backoff_ms", DEFAULT_IDLE_BACKOFF_MS)?
            .set_default("logging.filter", DEFAULT_LOG_FILTER)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SEQEXEC").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.queue.mailbox_capacity == 0 {
            return Err(ConfigError::Message(
                "queue.mailbox_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
