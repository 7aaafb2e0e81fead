// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic;
use std::sync::Once;
use thiserror::Error;

/// 任务标识生成错误
#[derive(Error, Debug)]
pub enum IdGenerationError {
    #[error("熵源不可用: {0}")]
    Entropy(String),
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("队列已关闭: {0}")]
    QueueClosed(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

thread_local! {
    static LAST_PANIC_BACKTRACE: RefCell<Option<Backtrace>> = const { RefCell::new(None) };
}

static PANIC_BACKTRACE_HOOK: Once = Once::new();

/// 安装 panic 钩子，在 panic 现场捕获调用栈
///
/// 原有钩子仍会被调用。重复调用只安装一次。
pub(crate) fn install_panic_backtrace_hook() {
    PANIC_BACKTRACE_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = LAST_PANIC_BACKTRACE.try_with(|slot| {
                *slot.borrow_mut() = Some(Backtrace::force_capture());
            });
            previous(info);
        }));
    });
}

/// 被捕获的 panic：负载文本加上 panic 现场的调用栈
#[derive(Debug)]
pub(crate) struct PanicReport {
    pub message: String,
    pub backtrace: String,
}

impl PanicReport {
    /// 在 `catch_unwind` 捕获点调用，取走当前线程最近一次 panic 的调用栈
    pub(crate) fn capture(payload: &(dyn Any + Send)) -> Self {
        let backtrace = LAST_PANIC_BACKTRACE
            .try_with(|slot| slot.borrow_mut().take())
            .ok()
            .flatten()
            .map(|backtrace| backtrace.to_string())
            .unwrap_or_else(|| "backtrace unavailable".to_string());

        Self {
            message: panic_message(payload),
            backtrace,
        }
    }
}

/// 提取 panic 负载中的文本信息
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
