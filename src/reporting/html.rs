//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the aggregate report model into a single self-contained HTML
//! document: overall summary cards, one section per plan with its
//! transaction table, and the error details of every failed request.
//!
//! 将汇总报告模型渲染为单个自包含的 HTML 文档：
//! 总体摘要卡片、每个计划一节（含事务表格），以及每个失败请求的错误详情。

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::{PlanSummary, ReportModel};

/// Embedded stylesheet; the report must render without network access.
/// 内嵌样式表；报告必须在无网络环境下可渲染。
const REPORT_CSS: &str = r#"
body { font-family: 'Segoe UI', sans-serif; background: #f6f7f9; margin: 0; padding: 24px; color: #24292f; }
h1 { margin-top: 0; }
.generated { color: #57606a; }
.summary-container { display: flex; gap: 16px; flex-wrap: wrap; margin-bottom: 24px; }
.summary-item { background: #fff; border-radius: 8px; padding: 16px 24px; box-shadow: 0 1px 3px rgba(0,0,0,.12); text-align: center; }
.summary-item .count { display: block; font-size: 1.8em; font-weight: 600; }
.summary-item .label { color: #57606a; }
.plan-section { background: #fff; border-radius: 8px; padding: 16px 24px; margin-bottom: 24px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.plan-stats { color: #57606a; margin-bottom: 12px; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 12px; border-bottom: 1px solid #d0d7de; }
th { background: #f6f8fa; }
.ok { color: #1a7f37; }
.fail { color: #cf222e; }
.failed-plans { background: #fff5f5; border: 1px solid #cf222e; border-radius: 8px; padding: 12px 24px; margin-bottom: 24px; }
.error-details { max-height: 320px; overflow-y: auto; }
"#;

/// Renders the report and writes it as `batch_report_<stamp>.html` into
/// `output_dir`. Returns the written path.
///
/// 渲染报告并以 `batch_report_<stamp>.html` 写入 `output_dir`，返回写入路径。
pub fn generate_html_report(
    report: &ReportModel,
    output_dir: &Path,
    stamp: &str,
) -> Result<PathBuf> {
    let path = output_dir.join(format!("batch_report_{stamp}.html"));
    fs::write(&path, render(report).into_string())
        .with_context(|| format!("Failed to write HTML report: {}", path.display()))?;
    Ok(path)
}

fn render(report: &ReportModel) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Load Test Batch Report" }
                style { (PreEscaped(REPORT_CSS)) }
            }
            body {
                h1 { "Load Test Batch Report" }
                p class="generated" { "Generated at " (report.generated_at) }

                div class="summary-container" {
                    (summary_item(report.systems.to_string(), "Systems"))
                    (summary_item(report.total_requests.to_string(), "Requests"))
                    (summary_item(format!("{:.2}%", report.success_rate()), "Success Rate"))
                    (summary_item(format!("{:.2}ms", report.mean_response_ms), "Mean Response"))
                    (summary_item(report.total_failed.to_string(), "Failed Requests"))
                }

                @if !report.failed_plans.is_empty() {
                    div class="failed-plans" {
                        h2 { "Failed Plans" }
                        ul {
                            @for name in &report.failed_plans {
                                li { (name) }
                            }
                        }
                    }
                }

                @for plan in &report.plans {
                    (plan_section(plan))
                }
            }
        }
    }
}

fn summary_item(count: String, label: &str) -> Markup {
    html! {
        div class="summary-item" {
            span class="count" { (count) }
            span class="label" { (label) }
        }
    }
}

fn plan_section(plan: &PlanSummary) -> Markup {
    html! {
        div class="plan-section" {
            h2 { (plan.plan) }
            p class="plan-stats" {
                (plan.total) " requests, "
                span class="ok" { (plan.success) " ok" } ", "
                span class="fail" { (plan.failed) " failed" } ". Mean "
                (format!("{:.2}ms", plan.mean_ms)) ", min "
                (plan.min_ms) "ms, max " (plan.max_ms) "ms, "
                (format!("{:.2} req/s", plan.tps)) ", "
                (format!("{:.2}% errors", plan.error_rate))
            }

            table {
                thead {
                    tr {
                        th { "Transaction" }
                        th { "Count" }
                        th { "OK" }
                        th { "Fail" }
                        th { "Mean" }
                        th { "Min" }
                        th { "Max" }
                        th { "Errors" }
                    }
                }
                tbody {
                    @for (label, t) in &plan.transactions {
                        tr {
                            td { (label) }
                            td { (t.count) }
                            td class="ok" { (t.success) }
                            td class=(if t.failed > 0 { "fail" } else { "" }) { (t.failed) }
                            td { (format!("{:.2}ms", t.mean_ms)) }
                            td { (t.min_ms) "ms" }
                            td { (t.max_ms) "ms" }
                            td { (format!("{:.2}%", t.error_rate)) }
                        }
                    }
                }
            }

            @if !plan.errors.is_empty() {
                h3 { "Error Details" }
                div class="error-details" {
                    table {
                        thead {
                            tr {
                                th { "Time" }
                                th { "Transaction" }
                                th { "Code" }
                                th { "Message" }
                                th { "Worker" }
                            }
                        }
                        tbody {
                            @for error in &plan.errors {
                                tr {
                                    td { (error.timestamp) }
                                    td { (error.label) }
                                    td { (error.response_code) }
                                    td { (error.failure_message.as_deref().unwrap_or("")) }
                                    td { (error.thread_name) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
