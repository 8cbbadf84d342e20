//! # Report Aggregation Module / 报告汇总模块
//!
//! Derives the cross-plan report model from a finished batch result: overall
//! request totals plus the per-plan summaries echoed for the renderers.
//! Pure computation; rendering and persistence live in `reporting`.
//!
//! 从完成的批次结果派生跨计划报告模型：总体请求统计，
//! 以及回显给渲染器的各计划摘要。纯计算；渲染与持久化位于 `reporting`。

use chrono::Local;

use crate::core::models::{BatchResult, ReportModel};

/// Builds the report model over a batch result.
///
/// The overall mean response time is the arithmetic mean of the per-plan
/// means. That matches the established report figures downstream consumers
/// compare against, so it is kept even though a request-weighted mean would
/// read more naturally; with no summaries at all it is zero.
///
/// 基于批次结果构建报告模型。
/// 总体平均响应时间是各计划均值的算术平均。它与下游消费者比对的既有报告口径
/// 一致，因此即使按请求数加权更自然也仍保留该口径；完全没有摘要时为零。
pub fn build_report(batch: &BatchResult) -> ReportModel {
    let systems = batch.summaries.len() as u64;

    let total_requests = batch.summaries.values().map(|s| s.total).sum();
    let total_success = batch.summaries.values().map(|s| s.success).sum();
    let total_failed = batch.summaries.values().map(|s| s.failed).sum();

    let mean_response_ms = if systems == 0 {
        0.0
    } else {
        batch.summaries.values().map(|s| s.mean_ms).sum::<f64>() / systems as f64
    };

    ReportModel {
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        systems,
        total_requests,
        total_success,
        total_failed,
        mean_response_ms,
        failed_plans: batch.failed.clone(),
        plans: batch.summaries.values().cloned().collect(),
    }
}
