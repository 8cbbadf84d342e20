//! # Console Reporting Module / 控制台报告模块
//!
//! Colored batch summary for the terminal: one row per plan with its request
//! counts, latency figures and throughput, followed by a warning block for
//! the plans that produced no summary.
//!
//! 终端的彩色批次摘要：每个计划一行，含请求计数、延迟指标和吞吐量，
//! 之后是未能产出摘要的计划的警告块。

use colored::*;

use crate::core::models::{PlanSummary, ReportModel};

/// Prints the batch summary table.
///
/// # Output Format / 输出格式
/// ```text
/// --- Batch Summary ---
///   Plan                           |  Requests |   OK | Fail |   Mean |      TPS | Errors
///   checkout                       |      1200 | 1188 |   12 |  140ms |    40.00 |  1.00%
///   search                         |       800 |  800 |    0 |   95ms |    26.60 |  0.00%
/// ```
pub fn print_summary(report: &ReportModel) {
    println!("\n{}", "--- Batch Summary ---".bold());
    println!(
        "  {:<30} | {:>9} | {:>6} | {:>6} | {:>8} | {:>8} | {:>7}",
        "Plan", "Requests", "OK", "Fail", "Mean", "TPS", "Errors"
    );

    for summary in &report.plans {
        println!(
            "  {:<30} | {:>9} | {:>6} | {:>6} | {:>6.0}ms | {:>8.2} | {:>6.2}%",
            plan_cell(summary),
            summary.total,
            summary.success.to_string().green(),
            fail_cell(summary),
            summary.mean_ms,
            summary.tps,
            summary.error_rate
        );
    }

    println!(
        "\n  {} systems, {} requests, {:.2}% success, mean response {:.2}ms",
        report.systems,
        report.total_requests,
        report.success_rate(),
        report.mean_response_ms
    );

    print_failed_plans(&report.failed_plans);
}

fn plan_cell(summary: &PlanSummary) -> ColoredString {
    if summary.failed == 0 {
        summary.plan.normal()
    } else {
        summary.plan.yellow()
    }
}

fn fail_cell(summary: &PlanSummary) -> ColoredString {
    if summary.failed == 0 {
        summary.failed.to_string().normal()
    } else {
        summary.failed.to_string().red()
    }
}

/// Prints the names of the plans that never produced a summary.
/// 打印从未产出摘要的计划名称。
pub fn print_failed_plans(failed: &[String]) {
    if failed.is_empty() {
        return;
    }

    println!("\n{}", "--- Failed Plans ---".red().bold());
    for name in failed {
        println!("  - {}", name.red());
    }
    println!(
        "{}",
        "Check the run log for each plan's engine output.".yellow()
    );
}
