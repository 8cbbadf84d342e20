//! # Batch Configuration Module / 批量配置模块
//!
//! Loading and validation of the batch configuration file, which names the
//! engine installation, the plan directory and the result directory, and
//! carries the optional execution knobs.
//!
//! 批量配置文件的加载和校验。该文件指定引擎安装目录、计划目录和结果目录，
//! 并携带可选的执行参数。

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The batch configuration, loaded from a TOML file.
/// 从 TOML 文件加载的批量配置。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Root of the engine installation. `~` and `$VAR` references are
    /// expanded at load time. The engine binary is expected under `bin/`.
    ///
    /// 引擎安装根目录。加载时展开 `~` 和 `$VAR` 引用。
    /// 引擎可执行文件应位于其 `bin/` 下。
    pub engine_home: String,
    /// Optional explicit engine binary, overriding the path derived from
    /// `engine_home`. Useful when the engine is on `PATH` or wrapped.
    ///
    /// 可选的显式引擎可执行文件，覆盖从 `engine_home` 派生的路径。
    #[serde(default)]
    pub engine_bin: Option<PathBuf>,
    /// Directory searched recursively for plan files.
    /// 递归搜索计划文件的目录。
    pub plans_dir: PathBuf,
    /// Root directory that receives per-day result trees and logs.
    /// 接收按天结果树和日志的根目录。
    pub results_dir: PathBuf,
    /// Upper bound on concurrently running plans. Defaults to half the host
    /// cores plus one when absent here and on the command line.
    ///
    /// 并发运行计划数的上限。此处与命令行均缺省时，默认为主机核数的一半加一。
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Optional per-plan time limit in seconds; an exceeded limit is recorded
    /// as that plan's failure and does not touch its siblings.
    ///
    /// 可选的单计划时间限制（秒）；超限记为该计划的失败，不影响其它计划。
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Extra arguments appended verbatim to every engine invocation,
    /// split with shell-style quoting rules.
    ///
    /// 附加到每次引擎调用末尾的额外参数，按 shell 引号规则拆分。
    #[serde(default)]
    pub extra_args: Option<String>,
}

impl BatchConfig {
    /// The engine binary to invoke: the explicit override when present,
    /// otherwise `<engine_home>/bin/jmeter` (`jmeter.bat` on Windows).
    pub fn engine_bin(&self) -> PathBuf {
        if let Some(bin) = &self.engine_bin {
            return bin.clone();
        }
        let name = if cfg!(windows) { "jmeter.bat" } else { "jmeter" };
        Path::new(&self.engine_home).join("bin").join(name)
    }

    /// Splits `extra_args` with shell quoting rules.
    /// An unparsable string (e.g. an unclosed quote) is an error.
    pub fn extra_args(&self) -> Result<Vec<String>> {
        match &self.extra_args {
            None => Ok(Vec::new()),
            Some(raw) => shlex::split(raw)
                .ok_or_else(|| anyhow!("Failed to parse extra_args: {raw}")),
        }
    }
}

/// Loads and validates a batch configuration from `path`.
/// `engine_home` is expanded; relative directories stay relative to the
/// process working directory, matching how the paths appear in logs.
///
/// 从 `path` 加载并校验批量配置。
/// `engine_home` 会被展开；相对目录保持相对于进程工作目录。
pub fn load_batch_config(path: &Path) -> Result<BatchConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: BatchConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config.engine_home = shellexpand::full(&config.engine_home)
        .with_context(|| format!("Failed to expand engine_home: {}", config.engine_home))?
        .to_string();

    // Surface a bad extra_args string at load time rather than mid-batch.
    config.extra_args()?;

    Ok(config)
}
