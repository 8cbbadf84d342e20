//! # File System Operations Module / 文件系统操作模块
//!
//! Plan discovery and result directory management: the recursive search for
//! plan files, the per-day result root, and the run timestamp embedded into
//! every per-plan output path.
//!
//! 计划发现和结果目录管理：计划文件的递归搜索、按天的结果根目录，
//! 以及嵌入每个计划输出路径的运行时间戳。

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension that identifies a plan file.
/// 标识计划文件的扩展名。
const PLAN_EXTENSION: &str = "jmx";

/// Recursively collects every plan file under `root`, sorted by path so the
/// batch submits plans in a deterministic order.
///
/// An empty result is not an error here; the caller decides whether a
/// plan-less batch is fatal.
///
/// 递归收集 `root` 下的所有计划文件，按路径排序，使批次以确定的顺序提交计划。
/// 空结果在这里不是错误；由调用方决定无计划的批次是否致命。
pub fn find_plan_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, &mut found)
        .with_context(|| format!("Failed to scan plan directory: {}", root.display()))?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(PLAN_EXTENSION) {
            found.push(path);
        }
    }
    Ok(())
}

/// Creates (if needed) and returns the per-day directory under the result
/// root, named `YYYYMMDD`.
///
/// 在结果根目录下创建（如需要）并返回按天目录，命名为 `YYYYMMDD`。
pub fn create_daily_dir(result_base: &Path) -> Result<PathBuf> {
    let daily = result_base.join(Local::now().format("%Y%m%d").to_string());
    fs::create_dir_all(&daily)
        .with_context(|| format!("Failed to create result directory: {}", daily.display()))?;
    Ok(daily)
}

/// A run timestamp shared by every plan in one batch, embedded into the
/// per-plan output directory names so runs never collide.
///
/// 一个批次内所有计划共享的运行时间戳，嵌入每个计划的输出目录名，
/// 使多次运行永不冲突。
pub fn run_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
