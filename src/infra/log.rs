//! # Durable Log Writer Module / 持久日志写入模块
//!
//! This module owns the session-scoped `.jsonl` file for the lifetime of a
//! benchmark run. Records are appended as independently parseable lines;
//! the file is never truncated, rewritten or read back by the running
//! process.
//!
//! 此模块在基准测试运行的整个生命周期内持有会话级 `.jsonl` 文件。
//! 记录以可独立解析的行追加；运行进程绝不截断、重写或回读该文件。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::core::models::LogRecord;

/// Append-only writer for one run's durable log.
///
/// The file handle is opened at run start and held until the writer is
/// dropped. Appends from concurrent execution units are serialized on an
/// internal lock, so each record lands as one uninterrupted line.
pub struct EvalLogWriter {
    path: PathBuf,
    file: Mutex<File>,
}

impl EvalLogWriter {
    /// Creates the log directory chain (with parents) and opens
    /// `<dir>/<session_id>.jsonl` for appending.
    pub async fn create(dir: &Path, session_id: &str) -> Result<Self> {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let path = dir.join(format!("{session_id}.jsonl"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// The log file's path, for display and post-run inspection.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes one record and appends it as a single line. The file lock
    /// is held across the whole write, so concurrent appends never
    /// interleave at sub-line granularity.
    pub async fn append(&self, record: &LogRecord) -> Result<()> {
        let mut line =
            serde_json::to_string(record).context("Failed to serialize log record")?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to append to log file: {}", self.path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to flush log file: {}", self.path.display()))?;
        Ok(())
    }
}
