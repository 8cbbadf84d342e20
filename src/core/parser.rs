//! # Result Parser Module / 结果解析模块
//!
//! Turns one plan's raw result rows into a [`PlanSummary`]. Reading the
//! engine's tabular result file and aggregating the rows are kept separate:
//! the aggregation is a pure function of the record set, so the same records
//! always produce the same summary.
//!
//! 将单个计划的原始结果行转换为 [`PlanSummary`]。
//! 读取引擎的表格结果文件与聚合行数据相互分离：
//! 聚合是记录集的纯函数，相同的记录总是产出相同的摘要。

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::models::{ErrorDetail, PlanSummary, RawRecord, TransactionSummary};

/// Reads all records from a header-bearing tabular result file.
///
/// The header row maps columns by name, so extra columns the engine emits are
/// ignored. A missing required column or a malformed row is an error; a file
/// holding only the header yields an empty record set, which the aggregation
/// treats as the defined degenerate case.
///
/// 从带表头的表格结果文件中读取所有记录。
/// 表头按名称映射列，引擎多写的列会被忽略。缺少必需列或行格式错误即为错误；
/// 只有表头的文件产出空记录集，聚合将其视为定义好的退化情形。
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open result file: {}", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: RawRecord =
            row.with_context(|| format!("Malformed result row in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Aggregates a record set into a plan summary. Single pass per figure,
/// no I/O, no mutation of the input.
///
/// Degenerate cases are defined rather than erroneous: an empty record set
/// yields all-zero statistics, and a timestamp span of zero yields a
/// throughput of zero. Error details keep the original record order.
///
/// 将记录集聚合为计划摘要。每个指标单次遍历，无 I/O，不修改输入。
/// 退化情形有明确定义而非错误：空记录集产出全零统计，
/// 时间戳跨度为零时吞吐量为零。错误详情保持原始记录顺序。
pub fn summarize(records: &[RawRecord], plan_name: &str) -> PlanSummary {
    let total = records.len() as u64;
    let success = records.iter().filter(|r| r.success).count() as u64;
    let failed = total - success;

    let (mean_ms, min_ms, max_ms) = elapsed_stats(records);

    let tps = match (
        records.iter().map(|r| r.time_stamp).min(),
        records.iter().map(|r| r.time_stamp).max(),
    ) {
        (Some(first), Some(last)) if last > first => {
            total as f64 / ((last - first) as f64 / 1000.0)
        }
        _ => 0.0,
    };

    let error_rate = rate(failed, total);

    let mut groups: BTreeMap<&str, Vec<&RawRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.label.as_str()).or_default().push(record);
    }
    let transactions = groups
        .into_iter()
        .map(|(label, group)| (label.to_string(), summarize_group(&group)))
        .collect();

    let errors = records
        .iter()
        .filter(|r| !r.success)
        .map(|r| ErrorDetail {
            label: r.label.clone(),
            response_code: r.response_code.clone(),
            failure_message: r.failure_message.clone(),
            thread_name: r.thread_name.clone(),
            timestamp: format_timestamp(r.time_stamp),
        })
        .collect();

    PlanSummary {
        plan: plan_name.to_string(),
        total,
        success,
        failed,
        mean_ms,
        min_ms,
        max_ms,
        tps,
        error_rate,
        transactions,
        errors,
    }
}

fn summarize_group(group: &[&RawRecord]) -> TransactionSummary {
    let count = group.len() as u64;
    let success = group.iter().filter(|r| r.success).count() as u64;
    let failed = count - success;

    let sum: u64 = group.iter().map(|r| r.elapsed).sum();
    let mean_ms = if count == 0 { 0.0 } else { sum as f64 / count as f64 };
    let min_ms = group.iter().map(|r| r.elapsed).min().unwrap_or(0);
    let max_ms = group.iter().map(|r| r.elapsed).max().unwrap_or(0);

    TransactionSummary {
        count,
        success,
        failed,
        mean_ms,
        min_ms,
        max_ms,
        error_rate: rate(failed, count),
    }
}

fn elapsed_stats(records: &[RawRecord]) -> (f64, u64, u64) {
    if records.is_empty() {
        return (0.0, 0, 0);
    }
    let sum: u64 = records.iter().map(|r| r.elapsed).sum();
    let mean = sum as f64 / records.len() as f64;
    let min = records.iter().map(|r| r.elapsed).min().unwrap_or(0);
    let max = records.iter().map(|r| r.elapsed).max().unwrap_or(0);
    (mean, min, max)
}

fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Converts an epoch-millisecond timestamp into a local, second-precision
/// string. An out-of-range value falls back to the raw number so a corrupt
/// row never panics the aggregation.
fn format_timestamp(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
