//! # Logging Setup Module / 日志配置模块
//!
//! Tracing bootstrap for a batch run: a console layer for the operator and a
//! per-day log file under the result tree. The `RUST_LOG` environment
//! variable filters both; the default level is `info`.
//!
//! 批量运行的 tracing 初始化：面向操作者的控制台层，
//! 以及结果树下按天滚动的日志文件。`RUST_LOG` 环境变量过滤两者；默认级别为 `info`。

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber, logging to stderr and to
/// `<log_dir>/run_<YYYYMMDD>.log`. Returns the log file path.
///
/// Repeated initialization in the same process is tolerated (the first
/// subscriber wins), which keeps in-process tests simple.
///
/// 初始化全局 tracing 订阅者，同时输出到标准错误和
/// `<log_dir>/run_<YYYYMMDD>.log`，并返回日志文件路径。
/// 同一进程内的重复初始化是被容忍的（首个订阅者生效），以便进程内测试。
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let log_file = log_dir.join(format!("run_{}.log", Local::now().format("%Y%m%d")));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .try_init();

    Ok(log_file)
}
