//! # Plan Execution Module / 计划执行模块
//!
//! Runs a single plan end-to-end: builds the engine invocation, supervises
//! the process to exit, verifies the post-conditions on its output, and hands
//! the result file to the parser. Every failure along the way becomes a typed
//! outcome for exactly this plan; nothing here can abort a sibling.
//!
//! 端到端运行单个计划：构建引擎调用，监督进程退出，校验其输出的后置条件，
//! 并将结果文件交给解析器。沿途的每个失败都成为仅针对该计划的类型化结果；
//! 这里的任何情况都不会中止其它计划。

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::core::models::{FailureReason, PlanOutcome, TestPlan};
use crate::core::parser;
use crate::infra::command::spawn_and_capture;

/// Everything a worker needs to run one plan. Shared read-only across the
/// batch; per-plan output paths are derived from it.
///
/// 工作任务运行单个计划所需的一切。批次内只读共享；单计划输出路径由它派生。
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The engine binary to invoke.
    pub engine_bin: PathBuf,
    /// The per-day directory receiving one output directory per plan.
    pub daily_dir: PathBuf,
    /// Run timestamp shared by all plans of this batch.
    pub stamp: String,
    /// Optional per-plan time limit.
    pub timeout: Option<Duration>,
    /// Extra arguments appended to every invocation.
    pub extra_args: Vec<String>,
}

impl RunContext {
    /// Output directory for one plan: `<daily>/<name>_<stamp>/`.
    /// The embedded name and shared stamp keep plans of one run disjoint.
    pub fn plan_output_dir(&self, plan: &TestPlan) -> PathBuf {
        self.daily_dir.join(format!("{}_{}", plan.name, self.stamp))
    }
}

/// The main entry point for running a single plan. Wraps the execution with
/// the optional time limit; an exceeded limit kills the engine process and
/// is recorded as this plan's failure.
///
/// 运行单个计划的主入口。为执行包上可选的时间限制；
/// 超限会杀掉引擎进程并记为该计划的失败。
pub async fn run_plan(plan: TestPlan, ctx: &RunContext) -> PlanOutcome {
    let Some(limit) = ctx.timeout else {
        return execute(plan, ctx).await;
    };

    let start = Instant::now();
    match tokio::time::timeout(limit, execute(plan.clone(), ctx)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!("Plan {} timed out after {}s", plan.name, limit.as_secs());
            PlanOutcome::Failed {
                plan,
                reason: FailureReason::Timeout,
                output: format!("plan exceeded the configured limit of {}s", limit.as_secs()),
                duration: start.elapsed(),
            }
        }
    }
}

/// The unguarded execution flow: spawn, wait, check, parse.
async fn execute(plan: TestPlan, ctx: &RunContext) -> PlanOutcome {
    let start = Instant::now();

    let out_dir = ctx.plan_output_dir(&plan);
    let jtl_file = out_dir.join(format!("{}.jtl", plan.name));
    let report_dir = out_dir.join("html_report");

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        return PlanOutcome::Failed {
            plan,
            reason: FailureReason::Launch,
            output: format!("failed to create output directory {}: {e}", out_dir.display()),
            duration: start.elapsed(),
        };
    }

    info!("Executing plan: {}", plan.name);

    let mut cmd = tokio::process::Command::new(&ctx.engine_bin);
    cmd.args(engine_args(&plan.path, &jtl_file, &report_dir, &ctx.extra_args))
        .kill_on_drop(true);

    let (status_res, output) = spawn_and_capture(cmd).await;

    let status = match status_res {
        Ok(status) => status,
        Err(e) => {
            warn!("Failed to launch engine for plan {}: {e}", plan.name);
            return PlanOutcome::Failed {
                plan,
                reason: FailureReason::Launch,
                output: format!("failed to launch {}: {e}", ctx.engine_bin.display()),
                duration: start.elapsed(),
            };
        }
    };

    if !status.success() {
        warn!("Engine exited with {status} for plan {}", plan.name);
        return PlanOutcome::Failed {
            plan,
            reason: FailureReason::EngineExit,
            output,
            duration: start.elapsed(),
        };
    }

    // The engine can exit 0 without ever flushing its result file; a clean
    // exit alone is not success.
    if !jtl_file.exists() {
        warn!("Engine produced no result file for plan {}", plan.name);
        return PlanOutcome::Failed {
            plan,
            reason: FailureReason::MissingResults,
            output: format!(
                "expected result file {} was not written\n{output}",
                jtl_file.display()
            ),
            duration: start.elapsed(),
        };
    }

    debug!("Engine output for plan {}:\n{}", plan.name, output.trim_end());

    let records = match parser::read_records(&jtl_file) {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to parse results of plan {}: {e:#}", plan.name);
            return PlanOutcome::Failed {
                plan,
                reason: FailureReason::Parse,
                output: format!("{e:#}"),
                duration: start.elapsed(),
            };
        }
    };

    let summary = parser::summarize(&records, &plan.name);
    info!(
        "Plan completed: {} ({} requests, {:.2}% errors, {:.2} req/s)",
        plan.name, summary.total, summary.error_rate, summary.tps
    );

    PlanOutcome::Completed {
        plan,
        summary,
        duration: start.elapsed(),
    }
}

/// Builds the engine's argument list: non-interactive mode, CSV result
/// output to `jtl_file`, and a visual report bundle in `report_dir`.
///
/// 构建引擎的参数列表：非交互模式、CSV 结果输出到 `jtl_file`、
/// 并在 `report_dir` 生成可视化报告包。
pub fn engine_args(
    plan_file: &Path,
    jtl_file: &Path,
    report_dir: &Path,
    extra: &[String],
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-Jjmeter.save.saveservice.output_format=csv".into(),
        "-n".into(),
        "-t".into(),
        plan_file.into(),
        "-l".into(),
        jtl_file.into(),
        "-e".into(),
        "-o".into(),
        report_dir.into(),
    ];
    args.extend(extra.iter().map(OsString::from));
    args
}
