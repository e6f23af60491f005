//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the eval
//! matrix. It includes the classified outcome of one execution unit, the
//! per-cell status machine driving the live display, and the durable log
//! record format.
//!
//! 此模块定义了整个评测矩阵中使用的核心数据结构。
//! 它包括单个执行单元的分类结果、驱动实时显示的单元格状态机，
//! 以及持久日志记录格式。

use serde::{Deserialize, Serialize};

use crate::core::message::Message;
use crate::core::provider::Completion;

/// The classified result of one (test case, model) execution unit.
/// Exactly one variant is produced per unit; `completion` is present if and
/// only if generation succeeded.
///
/// This is a closed sum type: the classifier below matches exhaustively with
/// no wildcard arm, so an unhandled variant is a compile error rather than a
/// silently ignored runtime condition.
///
/// 单个（测试用例，模型）执行单元的分类结果。
/// 每个单元恰好产生一个变体；`completion` 当且仅当生成成功时存在。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EvalOutcome {
    /// The model capability itself failed; the assertion was never invoked.
    /// 模型能力本身失败；断言从未被调用。
    #[serde(rename = "failed-to-generate", rename_all = "camelCase")]
    FailedToGenerate {
        /// Human-readable error from the generation attempt.
        /// 生成尝试产生的人类可读错误。
        completion_error: String,
    },
    /// Generation succeeded but the test case's assertion raised.
    /// 生成成功，但测试用例的断言失败。
    #[serde(rename = "test-failed", rename_all = "camelCase")]
    TestFailed {
        /// The completion the assertion was run against.
        /// 断言所针对的补全结果。
        completion: Completion,
        /// Human-readable assertion error. / 人类可读的断言错误。
        test_error: String,
    },
    /// Generation succeeded and the assertion passed.
    /// 生成成功且断言通过。
    #[serde(rename = "test-passed")]
    TestPassed { completion: Completion },
}

impl EvalOutcome {
    /// `true` only for [`EvalOutcome::TestPassed`].
    pub fn is_success(&self) -> bool {
        matches!(self, EvalOutcome::TestPassed { .. })
    }

    /// Total classification of an outcome into its terminal status cell.
    /// Every variant has exactly one terminal status; adding a variant
    /// without classifying it fails to compile here.
    ///
    /// 将结果完整分类为其终止状态单元格。
    /// 每个变体恰好对应一个终止状态；新增变体而未在此分类将无法编译。
    pub fn status(&self) -> Status {
        match self {
            EvalOutcome::FailedToGenerate { .. } => Status::GenerationFailure,
            EvalOutcome::TestFailed { .. } => Status::TestFailure,
            EvalOutcome::TestPassed { .. } => Status::Success,
        }
    }

    /// The completion, present iff generation succeeded.
    /// 补全结果，当且仅当生成成功时存在。
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            EvalOutcome::FailedToGenerate { .. } => None,
            EvalOutcome::TestFailed { completion, .. } => Some(completion),
            EvalOutcome::TestPassed { completion } => Some(completion),
        }
    }

    /// The raw error text for failures, `None` for a pass.
    /// 失败时的原始错误文本，通过时为 `None`。
    pub fn error_text(&self) -> Option<&str> {
        match self {
            EvalOutcome::FailedToGenerate { completion_error } => Some(completion_error),
            EvalOutcome::TestFailed { test_error, .. } => Some(test_error),
            EvalOutcome::TestPassed { .. } => None,
        }
    }

    /// The wire tag of this variant, as written to the durable log.
    /// 此变体的序列化标签，与写入持久日志的一致。
    pub fn type_name(&self) -> &'static str {
        match self {
            EvalOutcome::FailedToGenerate { .. } => "failed-to-generate",
            EvalOutcome::TestFailed { .. } => "test-failed",
            EvalOutcome::TestPassed { .. } => "test-passed",
        }
    }
}

/// State of one (test case, model) cell in the status matrix.
/// Transitions are monotonic: `Waiting → Running →` exactly one of the
/// three terminal states, with no further transitions.
///
/// 状态矩阵中单个（测试用例，模型）单元格的状态。
/// 状态转换是单调的：`Waiting → Running →` 三个终止状态之一，之后不再转换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Waiting,
    Running,
    Success,
    TestFailure,
    GenerationFailure,
}

impl Status {
    /// Short glyph rendered in the live status table.
    /// 实时状态表中渲染的短符号。
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Waiting => "⏳",
            Status::Running => "🔄",
            Status::Success => "✅",
            Status::TestFailure => "❌",
            Status::GenerationFailure => "👎",
        }
    }

    /// `true` once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Status::Success | Status::TestFailure | Status::GenerationFailure
        )
    }
}

/// One durable record per completed execution unit, appended to the
/// session's `.jsonl` file and never mutated after write.
///
/// 每个完成的执行单元对应一条持久记录，追加到会话的 `.jsonl` 文件中，
/// 写入后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// The test case's unique name. / 测试用例的唯一名称。
    pub test_case: String,
    /// The model identifier. / 模型标识符。
    pub model: String,
    /// The test case's input conversation. / 测试用例的输入会话。
    pub messages: Vec<Message>,
    /// The classified outcome. / 分类后的结果。
    pub result: EvalOutcome,
}
