//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Plan Runner,
//! including data models, configuration, plan execution, batch
//! coordination and report aggregation.
//!
//! 此模块包含 Plan Runner 的核心功能，
//! 包括数据模型、配置、计划执行、批量协调和报告汇总。

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod execution;
pub mod models;
pub mod parser;

// Re-exports
pub use batch::run_batch;
pub use config::BatchConfig;
pub use execution::run_plan;
pub use models::{BatchResult, PlanOutcome, PlanSummary};
