//! # Aggregation Module Unit Tests / 汇总模块单元测试
//!
//! Tests for the cross-plan report model: totals, the mean-of-means overall
//! response time, and the echoed per-plan data.
//!
//! 跨计划报告模型的测试：总量、均值的均值口径的总体响应时间，
//! 以及回显的各计划数据。

use plan_runner::core::aggregate::build_report;
use plan_runner::core::models::{BatchResult, FailureReason, PlanOutcome, PlanSummary, TestPlan};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

fn summary(name: &str, total: u64, failed: u64, mean_ms: f64) -> PlanSummary {
    PlanSummary {
        plan: name.to_string(),
        total,
        success: total - failed,
        failed,
        mean_ms,
        min_ms: 0,
        max_ms: 0,
        tps: 0.0,
        error_rate: 0.0,
        transactions: BTreeMap::new(),
        errors: Vec::new(),
    }
}

fn batch_of(summaries: Vec<PlanSummary>, failed: Vec<&str>) -> BatchResult {
    let mut batch = BatchResult::default();
    for s in summaries {
        let plan = TestPlan {
            name: s.plan.clone(),
            path: PathBuf::from(format!("/plans/{}.jmx", s.plan)),
        };
        batch.record(PlanOutcome::Completed {
            plan,
            summary: s,
            duration: Duration::ZERO,
        });
    }
    for name in failed {
        batch.record(PlanOutcome::Failed {
            plan: TestPlan {
                name: name.to_string(),
                path: PathBuf::from(format!("/plans/{name}.jmx")),
            },
            reason: FailureReason::EngineExit,
            output: String::new(),
            duration: Duration::ZERO,
        });
    }
    batch
}

#[test]
fn test_overall_mean_is_a_mean_of_means() {
    // Request counts differ wildly on purpose: the overall figure must stay
    // the arithmetic mean of the per-plan means, not a weighted average.
    let batch = batch_of(
        vec![
            summary("light", 10, 0, 100.0),
            summary("heavy", 10_000, 0, 200.0),
        ],
        vec![],
    );

    let report = build_report(&batch);
    assert_eq!(report.mean_response_ms, 150.0);
}

#[test]
fn test_totals_sum_across_plans() {
    let batch = batch_of(
        vec![
            summary("a", 100, 10, 50.0),
            summary("b", 200, 0, 70.0),
            summary("c", 50, 5, 90.0),
        ],
        vec![],
    );

    let report = build_report(&batch);
    assert_eq!(report.systems, 3);
    assert_eq!(report.total_requests, 350);
    assert_eq!(report.total_success, 335);
    assert_eq!(report.total_failed, 15);
    assert_eq!(report.total_success + report.total_failed, report.total_requests);
}

#[test]
fn test_failed_plans_do_not_count_as_systems() {
    let batch = batch_of(
        vec![summary("one", 10, 0, 10.0), summary("three", 10, 0, 30.0)],
        vec!["two"],
    );

    let report = build_report(&batch);
    assert_eq!(report.systems, 2);
    assert_eq!(report.failed_plans, vec!["two".to_string()]);
    assert_eq!(report.mean_response_ms, 20.0);
}

#[test]
fn test_empty_batch_yields_zeroed_report() {
    let report = build_report(&BatchResult::default());

    assert_eq!(report.systems, 0);
    assert_eq!(report.total_requests, 0);
    assert_eq!(report.mean_response_ms, 0.0);
    assert!(report.mean_response_ms.is_finite());
    assert_eq!(report.success_rate(), 0.0);
    assert!(report.plans.is_empty());
}

#[test]
fn test_plans_are_echoed_in_name_order() {
    let batch = batch_of(
        vec![
            summary("zeta", 1, 0, 1.0),
            summary("alpha", 1, 0, 1.0),
            summary("mid", 1, 0, 1.0),
        ],
        vec![],
    );

    let report = build_report(&batch);
    let names: Vec<&str> = report.plans.iter().map(|p| p.plan.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_success_rate() {
    let batch = batch_of(vec![summary("a", 200, 50, 10.0)], vec![]);
    let report = build_report(&batch);
    assert_eq!(report.success_rate(), 75.0);
}
