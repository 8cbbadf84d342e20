//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a new batch
//! configuration file, either from a short interactive wizard or as a
//! commented default.
//!
//! 此模块实现 `init` 命令，用于创建新的批量配置文件，
//! 可通过简短的交互式向导，也可直接生成带注释的默认配置。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Input;
use std::{fs, path::PathBuf};

const DEFAULT_ENGINE_HOME: &str = "/opt/apache-jmeter";
const DEFAULT_PLANS_DIR: &str = "plans";
const DEFAULT_RESULTS_DIR: &str = "test_results";

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `non_interactive` - Skip the wizard and write the defaults
pub fn execute(output: PathBuf, force: bool, non_interactive: bool) -> Result<()> {
    // Check if file already exists
    if output.exists() && !force {
        println!(
            "{}",
            format!("{} already exists.", output.display()).red()
        );
        println!("{}", "Pass --force to overwrite it.".yellow());
        return Ok(());
    }

    let content = if non_interactive {
        render_config(
            DEFAULT_ENGINE_HOME,
            DEFAULT_PLANS_DIR,
            DEFAULT_RESULTS_DIR,
            num_cpus::get() / 2 + 1,
        )
    } else {
        run_wizard()?
    };

    // Create parent directories if needed
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        format!("Wrote batch configuration to {}", output.display()).green()
    );
    println!("Adjust the paths if needed, then start a batch with: plan-runner run");

    Ok(())
}

/// Asks for the handful of values everyone edits anyway.
/// 询问那几个反正都要改的值。
fn run_wizard() -> Result<String> {
    let engine_home: String = Input::new()
        .with_prompt("Engine installation directory")
        .default(DEFAULT_ENGINE_HOME.to_string())
        .interact_text()?;

    let plans_dir: String = Input::new()
        .with_prompt("Directory containing the plan files")
        .default(DEFAULT_PLANS_DIR.to_string())
        .interact_text()?;

    let results_dir: String = Input::new()
        .with_prompt("Directory receiving results and logs")
        .default(DEFAULT_RESULTS_DIR.to_string())
        .interact_text()?;

    let jobs: usize = Input::new()
        .with_prompt("Maximum concurrent plans")
        .default(num_cpus::get() / 2 + 1)
        .interact_text()?;

    Ok(render_config(&engine_home, &plans_dir, &results_dir, jobs))
}

fn render_config(engine_home: &str, plans_dir: &str, results_dir: &str, jobs: usize) -> String {
    format!(
        r#"# Batch Configuration / 批量配置

# Engine installation root; the binary is expected under bin/.
# `~` and environment variables are expanded.
# 引擎安装根目录；可执行文件应位于 bin/ 下。支持 `~` 和环境变量展开。
engine_home = "{engine_home}"

# Uncomment to point at the engine binary directly instead.
# 取消注释以直接指定引擎可执行文件。
# engine_bin = "/usr/local/bin/jmeter"

# Directory searched recursively for plan files.
# 递归搜索计划文件的目录。
plans_dir = "{plans_dir}"

# Results and logs are written beneath this directory, one subtree per day.
# 结果和日志写入此目录之下，每天一棵子树。
results_dir = "{results_dir}"

# Maximum number of plans executing concurrently.
# 并发执行计划数的上限。
jobs = {jobs}

# Optional per-plan time limit in seconds.
# 可选的单计划时间限制（秒）。
# timeout_secs = 900

# Optional extra arguments appended to every engine invocation.
# 可选的附加到每次引擎调用的额外参数。
# extra_args = "-Jserver.rmi.ssl.disable=true"
"#
    )
}
