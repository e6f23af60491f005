//! # Reporting Module / 报告模块
//!
//! This module handles the live status display during a benchmark run and
//! the colored console summary printed after it, with internationalization
//! support.
//!
//! 此模块处理基准测试运行期间的实时状态显示，
//! 以及运行结束后打印的彩色控制台摘要，支持国际化。

pub mod console;

// Re-export common reporting items
pub use console::{RunContext, print_failure_details, print_summary};
