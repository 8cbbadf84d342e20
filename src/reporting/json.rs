//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable counterpart of the HTML report: the full report model
//! serialized next to it, for downstream tooling that wants the numbers
//! without scraping markup.
//!
//! HTML 报告的机器可读对应物：完整报告模型序列化在其旁边，
//! 供想要数字而非抓取标记的下游工具使用。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::ReportModel;

/// Writes the report model as pretty-printed JSON,
/// named `batch_report_<stamp>.json`. Returns the written path.
///
/// 将报告模型写为格式化的 JSON，命名为 `batch_report_<stamp>.json`，返回写入路径。
pub fn write_json_report(report: &ReportModel, output_dir: &Path, stamp: &str) -> Result<PathBuf> {
    let path = output_dir.join(format!("batch_report_{stamp}.json"));
    let body = serde_json::to_string_pretty(report).context("Failed to serialize report model")?;
    fs::write(&path, body)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    Ok(path)
}
