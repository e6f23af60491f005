//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Eval Matrix,
//! including the durable log writer, terminal control and i18n support.
//!
//! 此模块为 Eval Matrix 提供基础设施服务，
//! 包括持久日志写入、终端控制和国际化支持。

pub mod log;
pub mod term;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
