//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: load the batch configuration,
//! verify the preconditions, fan the discovered plans out over the worker
//! pool, and render the aggregate report for the plans that completed.
//!
//! 此模块实现 `run` 命令：加载批量配置、校验前置条件、
//! 将发现的计划扇出到工作池，并为完成的计划渲染汇总报告。

use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use std::fs;
use tracing::{debug, info};

use crate::{
    core::{
        aggregate,
        batch::run_batch,
        config::{self, BatchConfig},
        execution::RunContext,
        models::TestPlan,
    },
    infra,
    reporting::{console, html::generate_html_report, json::write_json_report},
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `config_path` - Path to the batch configuration file
/// * `jobs` - Optional override of the concurrent-plan bound
/// * `plans_dir` - Optional override of the configured plan directory
///
/// # Returns
/// A Result indicating success or failure of the batch run
pub async fn execute(
    config_path: PathBuf,
    jobs: Option<usize>,
    plans_dir: Option<PathBuf>,
) -> Result<()> {
    let (batch_config, config_path) = setup_and_parse_config(&config_path)?;

    let log_file = infra::logging::init(&batch_config.results_dir.join("logs"))?;
    info!("Loaded batch configuration from {}", config_path.display());
    debug!("Run log: {}", log_file.display());

    let (engine_bin, plans) = prepare_environment(&batch_config, plans_dir)?;

    println!(
        "Executing {} plans with engine {}",
        plans.len().to_string().yellow(),
        engine_bin.display()
    );

    let daily_dir = infra::fs::create_daily_dir(&batch_config.results_dir)?;
    let stamp = infra::fs::run_stamp();
    let jobs = jobs
        .or(batch_config.jobs)
        .unwrap_or_else(|| num_cpus::get() / 2 + 1);

    let ctx = Arc::new(RunContext {
        engine_bin,
        daily_dir: daily_dir.clone(),
        stamp: stamp.clone(),
        timeout: batch_config.timeout_secs.map(Duration::from_secs),
        extra_args: batch_config.extra_args()?,
    });

    let batch = run_batch(plans, jobs, ctx).await;

    if batch.no_successes() {
        console::print_failed_plans(&batch.failed);
        println!(
            "\n{}",
            "No plan completed successfully; skipping the aggregate report."
                .yellow()
                .bold()
        );
        return Ok(());
    }

    let report = aggregate::build_report(&batch);
    let html_path = generate_html_report(&report, &daily_dir, &stamp)?;
    let json_path = write_json_report(&report, &daily_dir, &stamp)?;
    info!("Aggregate report written to {}", html_path.display());

    console::print_summary(&report);
    println!("\nHTML report: {}", html_path.display());
    println!("JSON report: {}", json_path.display());

    Ok(())
}

/// Resolves and parses the batch configuration file.
fn setup_and_parse_config(config_path_arg: &PathBuf) -> Result<(BatchConfig, PathBuf)> {
    let config_path = fs::canonicalize(config_path_arg).with_context(|| {
        format!(
            "Failed to read config file: {}",
            config_path_arg.display()
        )
    })?;

    let batch_config = config::load_batch_config(&config_path)?;

    Ok((batch_config, config_path))
}

/// Checks the hard preconditions of a batch: the engine binary must exist and
/// the plan directory must hold at least one plan. Either failing aborts the
/// run before any execution starts.
///
/// 校验批次的硬前置条件：引擎可执行文件必须存在，且计划目录至少包含一个计划。
/// 任一不满足都会在任何执行开始前中止本次运行。
fn prepare_environment(
    batch_config: &BatchConfig,
    plans_dir: Option<PathBuf>,
) -> Result<(PathBuf, Vec<TestPlan>)> {
    let engine_bin = batch_config.engine_bin();
    if !engine_bin.exists() {
        bail!(
            "Engine binary not found at {} (check engine_home in the configuration)",
            engine_bin.display()
        );
    }

    let plans_root = plans_dir.unwrap_or_else(|| batch_config.plans_dir.clone());
    let plan_files = infra::fs::find_plan_files(&plans_root)?;
    if plan_files.is_empty() {
        bail!("No plan files found under {}", plans_root.display());
    }

    let plans: Vec<TestPlan> = plan_files
        .into_iter()
        .filter_map(TestPlan::from_path)
        .collect();
    info!(
        "Discovered {} plans under {}",
        plans.len(),
        plans_root.display()
    );

    Ok((engine_bin, plans))
}
