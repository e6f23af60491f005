//! # Logger Module Unit Tests / Logger 模块单元测试
//!
//! Durable log writer behavior: directory creation, line-per-record
//! appends, and line-atomicity under concurrent writers.
//!
//! 持久日志写入器行为：目录创建、每条记录一行的追加，
//! 以及并发写入下的行原子性。

mod common;

use std::sync::Arc;

use eval_matrix::infra::log::EvalLogWriter;
use eval_matrix::{EvalOutcome, LogRecord, user};
use tempfile::tempdir;

use common::text_completion;

fn record(test_case: &str, model: &str, payload: &str) -> LogRecord {
    LogRecord {
        test_case: test_case.to_string(),
        model: model.to_string(),
        messages: vec![user("hi")],
        result: EvalOutcome::TestPassed {
            completion: text_completion(payload),
        },
    }
}

#[tokio::test]
async fn create_builds_the_directory_chain() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("nested").join("eval-out");

    let writer = EvalLogWriter::create(&dir, "session-1").await.unwrap();
    assert!(dir.is_dir());
    assert_eq!(
        writer.path().file_name().unwrap().to_str().unwrap(),
        "session-1.jsonl"
    );
    assert!(writer.path().exists());
}

#[tokio::test]
async fn sequential_appends_write_one_parseable_line_each() {
    let tmp = tempdir().unwrap();
    let writer = EvalLogWriter::create(tmp.path(), "session-2").await.unwrap();

    for i in 0..5 {
        writer
            .append(&record(&format!("case-{i}"), "model", "ok"))
            .await
            .unwrap();
    }

    let content = std::fs::read_to_string(writer.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        let parsed: LogRecord = serde_json::from_str(line).unwrap();
        assert_eq!(parsed.test_case, format!("case-{i}"));
    }
}

#[tokio::test]
async fn concurrent_appends_never_interleave() {
    let tmp = tempdir().unwrap();
    let writer = Arc::new(EvalLogWriter::create(tmp.path(), "session-3").await.unwrap());

    // Large payloads make torn writes likely if line atomicity is broken.
    let payload = "x".repeat(4096);
    let mut handles = Vec::new();
    for i in 0..32 {
        let writer = writer.clone();
        let payload = payload.clone();
        handles.push(tokio::spawn(async move {
            writer
                .append(&record(&format!("case-{i:02}"), "model", &payload))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let content = std::fs::read_to_string(writer.path()).unwrap();
    let mut seen: Vec<String> = Vec::new();
    for line in content.lines() {
        let parsed: LogRecord = serde_json::from_str(line)
            .expect("every line must parse independently");
        assert_eq!(parsed.result.completion().unwrap().text.len(), 4096);
        seen.push(parsed.test_case);
    }
    assert_eq!(seen.len(), 32);

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 32, "every record appears exactly once");
}

#[tokio::test]
async fn the_file_is_append_only_across_writers_of_one_session() {
    let tmp = tempdir().unwrap();
    let writer = EvalLogWriter::create(tmp.path(), "session-4").await.unwrap();
    writer.append(&record("a", "m", "ok")).await.unwrap();
    drop(writer);

    // Re-opening the same session id must not truncate what is already there.
    let writer = EvalLogWriter::create(tmp.path(), "session-4").await.unwrap();
    writer.append(&record("b", "m", "ok")).await.unwrap();

    let content = std::fs::read_to_string(writer.path()).unwrap();
    assert_eq!(content.lines().count(), 2);
}
