//! # Batch Coordination Module / 批量协调模块
//!
//! Fans one plan execution out per discovered plan over a bounded pool of
//! worker tasks and merges their outcomes into the batch result. Workers
//! return outcomes instead of touching shared state; the coordinator owns the
//! summary map and performs every write as completions arrive.
//!
//! 将每个发现的计划扇出为一次执行，运行在有界的工作任务池上，
//! 并把它们的结果合并进批次结果。工作任务返回结果而不触碰共享状态；
//! 协调器拥有摘要映射，在完成到达时执行所有写入。

use futures::{StreamExt, stream};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::execution::{RunContext, run_plan};
use crate::core::models::{BatchResult, FailureReason, PlanOutcome, TestPlan};

/// Runs every plan of the batch, at most `jobs` concurrently, and returns
/// once all of them have reported.
///
/// Each plan runs end-to-end in its own spawned task. One plan's failure is
/// recorded and logged but never cancels or delays its siblings; there is no
/// early exit. A worker task that dies (a panic in the pipeline) is recorded
/// as a launch failure for its plan.
///
/// 运行批次中的每个计划，最多 `jobs` 个并发，待全部上报后返回。
/// 每个计划在自己派生的任务中端到端运行。单个计划的失败会被记录并写日志，
/// 但绝不取消或拖延其它计划；没有提前退出。
/// 工作任务异常终止（管线中的 panic）记为该计划的启动失败。
pub async fn run_batch(plans: Vec<TestPlan>, jobs: usize, ctx: Arc<RunContext>) -> BatchResult {
    let total = plans.len();
    info!("Starting batch of {total} plans with up to {jobs} in flight");

    let mut completions = stream::iter(plans.into_iter().map(|plan| {
        let ctx = Arc::clone(&ctx);
        let fallback = plan.clone();
        async move {
            match tokio::spawn(async move { run_plan(plan, &ctx).await }).await {
                Ok(outcome) => outcome,
                Err(e) => PlanOutcome::Failed {
                    plan: fallback,
                    reason: FailureReason::Launch,
                    output: format!("worker task failed: {e}"),
                    duration: Duration::ZERO,
                },
            }
        }
    }))
    .buffer_unordered(jobs.max(1));

    let mut batch = BatchResult::default();
    while let Some(outcome) = completions.next().await {
        merge(&mut batch, outcome);
        info!("Batch progress: {}/{total} plans reported", batch.reported());
    }

    if !batch.failed.is_empty() {
        warn!("Failed plans: {}", batch.failed.join(", "));
    }
    info!(
        "Batch finished: {} succeeded, {} failed",
        batch.summaries.len(),
        batch.failed.len()
    );

    batch
}

/// The single merge point for worker outcomes.
/// 工作任务结果的唯一合并点。
fn merge(batch: &mut BatchResult, outcome: PlanOutcome) {
    match &outcome {
        PlanOutcome::Completed { plan, summary, duration } => {
            info!(
                "Plan {} finished in {:.2}s: {}/{} requests succeeded",
                plan.name,
                duration.as_secs_f64(),
                summary.success,
                summary.total
            );
        }
        PlanOutcome::Failed { plan, reason, .. } => {
            warn!("Plan {} failed: {reason}", plan.name);
        }
    }

    if let Some(replaced) = batch.record(outcome) {
        warn!(
            "Duplicate plan name {}: an earlier summary was replaced",
            replaced.plan
        );
    }
}
