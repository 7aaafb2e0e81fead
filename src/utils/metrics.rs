// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter, describe_gauge, gauge};

pub const QUEUE_PUSHED_TOTAL: &str = "seqexec_queue_pushed_total";
pub const QUEUE_POPPED_TOTAL: &str = "seqexec_queue_popped_total";
pub const QUEUE_DEPTH: &str = "seqexec_queue_depth";
pub const EXECUTOR_TASKS_TOTAL: &str = "seqexec_executor_tasks_total";

/// 注册指标描述
///
/// 导出器由集成方安装；未安装记录器时所有指标调用均为空操作。
pub fn describe_metrics() {
    describe_counter!(QUEUE_PUSHED_TOTAL, "Total number of tasks pushed to a queue");
    describe_counter!(QUEUE_POPPED_TOTAL, "Total number of tasks popped from a queue");
    describe_gauge!(QUEUE_DEPTH, "Number of tasks currently waiting in a queue");
    describe_counter!(
        EXECUTOR_TASKS_TOTAL,
        "Total number of tasks executed, labelled by outcome"
    );
}

pub(crate) fn record_push(strategy: &'static str, depth: usize) {
    counter!(QUEUE_PUSHED_TOTAL, "strategy" => strategy).increment(1);
    gauge!(QUEUE_DEPTH, "strategy" => strategy).set(depth as f64);
}

pub(crate) fn record_pop(strategy: &'static str, depth: usize) {
    counter!(QUEUE_POPPED_TOTAL, "strategy" => strategy).increment(1);
    gauge!(QUEUE_DEPTH, "strategy" => strategy).set(depth as f64);
}

pub(crate) fn record_execution(outcome: &'static str) {
    counter!(EXECUTOR_TASKS_TOTAL, "outcome" => outcome).increment(1);
}
