//! # Eval Matrix Library / Eval Matrix 库
//!
//! This library provides the core functionality for the Eval Matrix harness,
//! a scenario-driven benchmark executor that runs LLM tool-calling evals
//! across a matrix of models with live progress reporting.
//!
//! 此库为 Eval Matrix 工具提供核心功能，
//! 这是一个场景驱动的基准测试执行器，可在模型矩阵上运行 LLM 工具调用评测，
//! 并实时展示进度。
//!
//! ## Modules / 模块
//!
//! - `core` - Data model, suite registry and the benchmark execution engine
//! - `infra` - Infrastructure services like the durable log writer and terminal control
//! - `reporting` - Live status matrix rendering and post-run summaries
//! - `assertions` - Expectation helpers for writing eval assertions
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、套件注册表和基准测试执行引擎
//! - `infra` - 基础设施服务，如持久日志写入和终端控制
//! - `reporting` - 实时状态矩阵渲染和运行后摘要
//! - `assertions` - 用于编写评测断言的期望辅助函数
//! - `cli` - 命令行接口和命令

pub mod assertions;
pub mod cli;
mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::assertions::expect_single_tool_call;
pub use crate::cli::run;
pub use crate::core::message::{self, Message, Role, ToolInvocation, assistant, data, tool_call, user};
pub use crate::core::models::{EvalOutcome, LogRecord, Status};
pub use crate::core::provider::{Completion, GenerateRequest, LanguageModel, ToolCall};
pub use crate::core::suite::{Scenario, TestCase, TestSuite, TestSuiteBuilder, Tool};

/// Initializes the harness's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for console output. It attempts to match the full locale
/// (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
