//! # Runner Configuration Module / 运行器配置模块
//!
//! This module defines the optional runtime configuration loaded from an
//! `EvalMatrix.toml` file: output language, log directory and the
//! per-provider concurrency limit.
//!
//! 此模块定义从 `EvalMatrix.toml` 文件加载的可选运行时配置：
//! 输出语言、日志目录和每个提供商的并发上限。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Runtime configuration for benchmark runs, loaded from a TOML file.
/// Every field has a default, so the file itself is optional.
/// 从 TOML 文件加载的基准测试运行时配置。每个字段都有默认值，因此文件本身是可选的。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// The language for operator-facing console output (e.g. "en", "zh-CN").
    /// When absent, the system locale decides.
    /// 面向操作者的控制台输出语言（例如 "en"、"zh-CN"）。缺省时由系统区域设置决定。
    #[serde(default)]
    pub language: Option<String>,
    /// Directory receiving one `<session>.jsonl` file per benchmark run.
    /// 每次基准测试运行写入一个 `<session>.jsonl` 文件的目录。
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Bounded concurrency limit applied to each provider partition.
    /// 应用于每个提供商分区的有界并发上限。
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("eval-out")
}

fn default_max_concurrency() -> usize {
    3
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            language: None,
            log_dir: default_log_dir(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl RunnerConfig {
    /// Loads the configuration file if it exists. A missing file means
    /// defaults; a malformed file is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
