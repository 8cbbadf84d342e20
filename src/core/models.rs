//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the plan
//! runner: test plans, per-request result records, per-plan and per-batch
//! aggregates, and the final report model handed to the renderers.
//!
//! 此模块定义了整个计划运行器中使用的核心数据结构：
//! 测试计划、单请求结果记录、单计划与批次级聚合，以及交给渲染器的最终报告模型。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A single load-test plan discovered on disk.
/// Its name is the plan file's stem and doubles as the key in the batch result.
///
/// 在磁盘上发现的单个压测计划。
/// 其名称为计划文件的主名，同时作为批次结果中的键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPlan {
    /// Identifier derived from the file name, used in logs and output paths.
    /// 从文件名派生的标识符，用于日志和输出路径。
    pub name: String,
    /// Absolute path to the plan file handed to the engine.
    /// 交给引擎的计划文件的绝对路径。
    pub path: PathBuf,
}

impl TestPlan {
    /// Builds a plan from a file path, deriving the name from the file stem.
    /// Returns `None` when the path has no usable stem.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_stem()?.to_str()?.to_string();
        Some(Self { name, path })
    }
}

impl fmt::Display for TestPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One row of execution telemetry for a single simulated request, as written
/// by the engine into its tabular result file. Column names follow the
/// engine's header row; additional columns are ignored during parsing.
///
/// 引擎写入表格结果文件中的单个模拟请求的一行执行遥测。
/// 列名遵循引擎的表头行；解析时忽略额外的列。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Request start time as epoch milliseconds.
    /// 请求开始时间（epoch 毫秒）。
    #[serde(rename = "timeStamp")]
    pub time_stamp: i64,
    /// Elapsed time of the request in milliseconds.
    /// 请求耗时（毫秒）。
    pub elapsed: u64,
    /// Transaction or request name.
    /// 事务或请求名称。
    pub label: String,
    /// Whether the request succeeded.
    /// 请求是否成功。
    pub success: bool,
    /// Response code reported by the engine (not necessarily numeric).
    /// 引擎报告的响应码（不一定是数字）。
    #[serde(rename = "responseCode")]
    pub response_code: String,
    /// Failure message, absent for successful requests.
    /// 失败信息，成功请求没有该字段。
    #[serde(rename = "failureMessage")]
    pub failure_message: Option<String>,
    /// Name of the worker thread that issued the request.
    /// 发出请求的工作线程名称。
    #[serde(rename = "threadName")]
    pub thread_name: String,
}

/// Aggregate statistics for one named transaction within a plan.
/// 计划内单个命名事务的聚合统计。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub count: u64,
    pub success: u64,
    pub failed: u64,
    /// Mean elapsed time in milliseconds.
    pub mean_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
    /// Failed share of the transaction's requests, in percent.
    pub error_rate: f64,
}

/// Detail row for a single failed request, kept in original record order.
/// 单个失败请求的详情行，保持原始记录顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub label: String,
    pub response_code: String,
    pub failure_message: Option<String>,
    pub thread_name: String,
    /// Local wall-clock time of the request, second precision.
    /// 请求的本地时间，秒级精度。
    pub timestamp: String,
}

/// Per-plan aggregate produced by the result parser once a plan finishes.
/// Created immutably; owned by the batch result afterwards.
///
/// 计划完成后由结果解析器产出的单计划聚合。
/// 创建后不可变，此后归批次结果所有。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan name, mirrors the batch result key.
    pub plan: String,
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    /// Mean elapsed time in milliseconds over all records.
    pub mean_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
    /// Throughput: total requests over the wall-clock span of the record set,
    /// in requests per second. Zero when the span is zero.
    pub tps: f64,
    /// Failed share of all requests, in percent.
    pub error_rate: f64,
    /// Transaction label to its aggregate; keys are unique by construction.
    pub transactions: BTreeMap<String, TransactionSummary>,
    /// One entry per failed record, in original record order.
    pub errors: Vec<ErrorDetail>,
}

/// Enumerates the ways a single plan execution can fail.
/// Every variant is a per-plan failure; none of them aborts the batch.
///
/// 枚举单个计划执行可能失败的方式。
/// 每个变体都是计划级失败；没有任何一种会中止整个批次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The engine process could not be spawned, or its worker task died.
    /// 引擎进程无法启动，或其工作任务异常终止。
    Launch,
    /// The engine exited with a non-zero status.
    /// 引擎以非零状态退出。
    EngineExit,
    /// The engine exited successfully but never wrote the result file.
    /// 引擎成功退出但从未写出结果文件。
    MissingResults,
    /// The plan exceeded the configured time limit.
    /// 计划超出了配置的时间限制。
    Timeout,
    /// The result file existed but could not be parsed.
    /// 结果文件存在但无法解析。
    Parse,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::Launch => "engine launch failed",
            FailureReason::EngineExit => "engine exited with an error",
            FailureReason::MissingResults => "engine produced no result file",
            FailureReason::Timeout => "plan timed out",
            FailureReason::Parse => "result file could not be parsed",
        };
        f.write_str(s)
    }
}

/// The final outcome of running one plan end-to-end.
/// Workers return this through the coordinator's completion stream instead of
/// writing shared state; the coordinator consumes it explicitly.
///
/// 单个计划端到端运行的最终结果。
/// 工作任务通过协调器的完成流返回它，而不是写共享状态；协调器显式消费它。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlanOutcome {
    /// The plan executed to completion and its results were parsed.
    /// 计划执行完成且其结果已被解析。
    Completed {
        plan: TestPlan,
        summary: PlanSummary,
        /// Wall-clock time spent on this plan, spawn to parse.
        /// 此计划花费的真实时间，从启动到解析。
        duration: Duration,
    },
    /// The plan failed at some stage of the pipeline.
    /// 计划在管线的某个阶段失败。
    Failed {
        plan: TestPlan,
        reason: FailureReason,
        /// Combined stdout/stderr of the engine, kept for diagnostics.
        /// 引擎的标准输出/错误合并内容，保留用于诊断。
        output: String,
        duration: Duration,
    },
}

impl PlanOutcome {
    pub fn plan_name(&self) -> &str {
        match self {
            PlanOutcome::Completed { plan, .. } => &plan.name,
            PlanOutcome::Failed { plan, .. } => &plan.name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PlanOutcome::Failed { .. })
    }

    pub fn duration(&self) -> Duration {
        match self {
            PlanOutcome::Completed { duration, .. } => *duration,
            PlanOutcome::Failed { duration, .. } => *duration,
        }
    }
}

/// Accumulated outcome of a whole batch: one summary per completed plan and
/// the names of the plans that failed to produce one. Only the coordinator
/// mutates this, one insertion at a time, as workers report back.
///
/// 整个批次的累积结果：每个完成的计划一条摘要，以及未能产出摘要的计划名称。
/// 仅协调器在工作任务上报时逐条插入。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// Plan name to its summary, kept in name order for stable reporting.
    /// 计划名到摘要的映射，按名称有序以保证报告稳定。
    pub summaries: BTreeMap<String, PlanSummary>,
    /// Names of plans that failed execution or parsing.
    /// 执行或解析失败的计划名称。
    pub failed: Vec<String>,
}

impl BatchResult {
    /// Merges one worker outcome into the batch. Returns the replaced summary
    /// when two plans share a name, so the caller can warn about the clash.
    ///
    /// 将一个工作任务的结果合并进批次。当两个计划同名时返回被替换的摘要，
    /// 以便调用方对冲突发出警告。
    pub fn record(&mut self, outcome: PlanOutcome) -> Option<PlanSummary> {
        match outcome {
            PlanOutcome::Completed { plan, summary, .. } => {
                self.summaries.insert(plan.name, summary)
            }
            PlanOutcome::Failed { plan, .. } => {
                self.failed.push(plan.name);
                None
            }
        }
    }

    /// True when no plan produced a summary.
    pub fn no_successes(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Number of plans that reported, successfully or not.
    pub fn reported(&self) -> usize {
        self.summaries.len() + self.failed.len()
    }
}

/// Derived, read-only view over a batch result consumed by the renderers.
/// Recomputed fresh on every run; never persisted.
///
/// 渲染器消费的、基于批次结果派生的只读视图。
/// 每次运行时重新计算，从不持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
    /// Human-readable generation time.
    pub generated_at: String,
    /// Number of plans that produced a summary.
    pub systems: u64,
    pub total_requests: u64,
    pub total_success: u64,
    pub total_failed: u64,
    /// Arithmetic mean of the per-plan mean response times, in milliseconds.
    /// Deliberately a mean of means rather than a request-weighted average.
    ///
    /// 各计划平均响应时间的算术平均值（毫秒）。
    /// 刻意采用均值的均值，而非按请求数加权的平均。
    pub mean_response_ms: f64,
    /// Names of plans that failed to produce a summary.
    pub failed_plans: Vec<String>,
    /// The per-plan summaries, echoed in name order.
    pub plans: Vec<PlanSummary>,
}

impl ReportModel {
    /// Overall success share across all plans, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.total_success as f64 / self.total_requests as f64 * 100.0
        }
    }
}
