//! # CLI Integration Tests / CLI 集成测试
//!
//! Drives the compiled binary end-to-end: configuration bootstrap, the
//! precondition failures, and a full batch run against the stub engine.
//!
//! 端到端驱动编译后的二进制：配置初始化、前置条件失败，
//! 以及针对桩引擎的完整批量运行。

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn test_no_arguments_prints_help() {
    let mut cmd = Command::cargo_bin("plan-runner").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_run_with_missing_config_fails_with_context() {
    let temp_dir = common::setup_test_environment();

    let mut cmd = Command::cargo_bin("plan-runner").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("run")
        .arg("--config")
        .arg("absent.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_init_writes_a_config_and_respects_existing_files() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("BatchConfig.toml");

    let mut cmd = Command::cargo_bin("plan-runner").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("init")
        .arg("--non-interactive");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote batch configuration"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("engine_home"));
    assert!(content.contains("plans_dir"));
    assert!(content.contains("results_dir"));

    // A second init must refuse to clobber the file without --force.
    let mut again = Command::cargo_bin("plan-runner").unwrap();
    again
        .current_dir(temp_dir.path())
        .arg("init")
        .arg("--non-interactive");
    again
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[cfg(unix)]
mod batch_runs {
    use super::*;

    #[test]
    fn test_missing_engine_binary_aborts_before_execution() {
        let temp_dir = common::setup_test_environment();
        let plans_dir = temp_dir.path().join("plans");
        common::create_plan_files(&plans_dir, &["alpha"]);

        let config_path = common::write_config(
            temp_dir.path(),
            &temp_dir.path().join("missing-engine"),
            &plans_dir,
            &temp_dir.path().join("results"),
        );

        let mut cmd = Command::cargo_bin("plan-runner").unwrap();
        cmd.arg("run").arg("--config").arg(&config_path);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Engine binary not found"));
    }

    #[test]
    fn test_zero_discovered_plans_aborts_the_batch() {
        let temp_dir = common::setup_test_environment();
        let engine_bin = common::create_stub_engine(temp_dir.path());
        let plans_dir = temp_dir.path().join("plans");
        fs::create_dir_all(&plans_dir).unwrap();

        let config_path = common::write_config(
            temp_dir.path(),
            &engine_bin,
            &plans_dir,
            &temp_dir.path().join("results"),
        );

        let mut cmd = Command::cargo_bin("plan-runner").unwrap();
        cmd.arg("run").arg("--config").arg(&config_path);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("No plan files found"));
    }

    #[test]
    fn test_full_batch_produces_reports() {
        let temp_dir = common::setup_test_environment();
        let engine_bin = common::create_stub_engine(temp_dir.path());
        let plans_dir = temp_dir.path().join("plans");
        let results_dir = temp_dir.path().join("results");
        common::create_plan_files(&plans_dir, &["checkout", "search"]);

        let config_path =
            common::write_config(temp_dir.path(), &engine_bin, &plans_dir, &results_dir);

        let mut cmd = Command::cargo_bin("plan-runner").unwrap();
        cmd.arg("run").arg("--config").arg(&config_path);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Batch Summary"))
            .stdout(predicate::str::contains("checkout"))
            .stdout(predicate::str::contains("search"))
            .stdout(predicate::str::contains("HTML report:"))
            .stdout(predicate::str::contains("JSON report:"));

        // One daily directory with both report artifacts in it.
        let daily: Vec<_> = fs::read_dir(&results_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "logs")
            .collect();
        assert_eq!(daily.len(), 1);

        let entries: Vec<String> = fs::read_dir(daily[0].path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();

        assert!(entries.iter().any(|n| n.starts_with("batch_report_") && n.ends_with(".html")));
        assert!(entries.iter().any(|n| n.starts_with("batch_report_") && n.ends_with(".json")));
        assert!(entries.iter().any(|n| n.starts_with("checkout_")));
        assert!(entries.iter().any(|n| n.starts_with("search_")));

        // The per-day run log exists as well.
        assert!(results_dir.join("logs").is_dir());
    }

    #[test]
    fn test_partial_failure_still_reports_the_survivors() {
        let temp_dir = common::setup_test_environment();
        let engine_bin = common::create_stub_engine(temp_dir.path());
        let plans_dir = temp_dir.path().join("plans");
        common::create_plan_files(&plans_dir, &["steady", "broken_flow"]);

        let config_path = common::write_config(
            temp_dir.path(),
            &engine_bin,
            &plans_dir,
            &temp_dir.path().join("results"),
        );

        let mut cmd = Command::cargo_bin("plan-runner").unwrap();
        cmd.arg("run").arg("--config").arg(&config_path);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("steady"))
            .stdout(predicate::str::contains("Failed Plans"))
            .stdout(predicate::str::contains("broken_flow"));
    }

    #[test]
    fn test_all_plans_failing_skips_the_report() {
        let temp_dir = common::setup_test_environment();
        let engine_bin = common::create_stub_engine(temp_dir.path());
        let plans_dir = temp_dir.path().join("plans");
        common::create_plan_files(&plans_dir, &["broken_a", "broken_b"]);

        let config_path = common::write_config(
            temp_dir.path(),
            &engine_bin,
            &plans_dir,
            &temp_dir.path().join("results"),
        );

        let mut cmd = Command::cargo_bin("plan-runner").unwrap();
        cmd.arg("run").arg("--config").arg(&config_path);

        cmd.assert().success().stdout(predicate::str::contains(
            "No plan completed successfully; skipping the aggregate report.",
        ));
    }

    #[test]
    fn test_plans_dir_override_wins_over_config() {
        let temp_dir = common::setup_test_environment();
        let engine_bin = common::create_stub_engine(temp_dir.path());
        let configured = temp_dir.path().join("configured-plans");
        let overridden = temp_dir.path().join("override-plans");
        fs::create_dir_all(&configured).unwrap();
        common::create_plan_files(&overridden, &["from_override"]);

        let config_path = common::write_config(
            temp_dir.path(),
            &engine_bin,
            &configured,
            &temp_dir.path().join("results"),
        );

        let mut cmd = Command::cargo_bin("plan-runner").unwrap();
        cmd.arg("run")
            .arg("--config")
            .arg(&config_path)
            .arg("--plans-dir")
            .arg(&overridden);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("from_override"));
    }
}
