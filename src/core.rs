//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Eval Matrix,
//! including the conversation data model, suite construction, outcome
//! classification, run planning and the benchmark execution engine.
//!
//! 此模块包含 Eval Matrix 的核心功能，
//! 包括会话数据模型、套件构建、结果分类、运行计划和基准测试执行引擎。

pub mod config;
pub mod execution;
pub mod message;
pub mod models;
pub mod planner;
pub mod provider;
pub mod suite;

// Re-exports
pub use config::RunnerConfig;
pub use execution::{run_benchmark, run_test_case};
pub use models::EvalOutcome;
pub use suite::TestSuite;
