// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::LoggingSettings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志
///
/// `RUST_LOG` 优先，未设置时使用传入的默认过滤规则。
/// 重复调用是安全的，已安装的订阅者会被保留。
pub fn init_telemetry(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// 按配置初始化日志，过滤规则取自 `logging.filter`
pub fn init_telemetry_from_settings(settings: &LoggingSettings) {
    init_telemetry(&settings.filter);
}
