//! # Conversation Data Model / 会话数据模型
//!
//! This module defines the immutable conversation types a test case is built
//! from: message roles, messages, and synthetic tool invocations injected
//! into history for multi-turn fixtures.
//!
//! 此模块定义了构成测试用例的不可变会话类型：
//! 消息角色、消息以及为多轮测试注入历史记录的合成工具调用。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The speaker of a conversation message.
/// 会话消息的发言者。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reserved for the suite-level system prompt. A test case's stored
    /// conversation must never contain a system message; see
    /// [`TestSuiteBuilder::eval`](crate::core::suite::TestSuiteBuilder::eval).
    /// 保留给套件级系统提示词。测试用例存储的会话中绝不能包含系统消息。
    System,
    /// An end-user turn. / 最终用户的发言。
    User,
    /// A model turn, possibly carrying tool invocations.
    /// 模型的发言，可能携带工具调用。
    Assistant,
    /// An application-injected data turn. / 应用程序注入的数据发言。
    Data,
}

/// A *synthetic* prior tool call injected into conversation history so a
/// test case can start mid-dialogue. The engine never performs these itself.
///
/// 注入会话历史的*合成*工具调用，使测试用例可以从对话中途开始。
/// 引擎本身绝不会执行这些调用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    /// Unique id tying the call to its result. / 将调用与其结果关联的唯一 id。
    pub tool_call_id: String,
    /// Name of the invoked tool. / 被调用工具的名称。
    pub tool_name: String,
    /// The arguments the tool was (synthetically) called with.
    /// 工具被（合成地）调用时使用的参数。
    pub arguments: serde_json::Value,
    /// The result the tool (synthetically) returned.
    /// 工具（合成地）返回的结果。
    pub result: serde_json::Value,
}

/// One turn of a test case's stored conversation prefix.
/// 测试用例存储的会话前缀中的一轮发言。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Completed tool calls carried by this turn, if any.
    /// 此轮发言携带的已完成工具调用（如有）。
    #[serde(
        default,
        rename = "toolInvocations",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_invocations: Vec<ToolInvocation>,
}

/// Creates a user message. / 创建一条用户消息。
pub fn user(content: impl Into<String>) -> Message {
    Message {
        role: Role::User,
        content: content.into(),
        tool_invocations: Vec::new(),
    }
}

/// Creates an assistant message. / 创建一条助手消息。
pub fn assistant(content: impl Into<String>) -> Message {
    Message {
        role: Role::Assistant,
        content: content.into(),
        tool_invocations: Vec::new(),
    }
}

/// Creates a data message. / 创建一条数据消息。
pub fn data(content: impl Into<String>) -> Message {
    Message {
        role: Role::Data,
        content: content.into(),
        tool_invocations: Vec::new(),
    }
}

/// Creates an assistant message carrying one completed, synthetic tool call,
/// for seeding multi-turn fixtures. A fresh `toolCallId` is generated.
///
/// 创建一条携带一个已完成合成工具调用的助手消息，用于搭建多轮测试场景。
/// 会生成一个新的 `toolCallId`。
pub fn tool_call(
    tool_name: impl Into<String>,
    arguments: serde_json::Value,
    result: serde_json::Value,
) -> Message {
    Message {
        role: Role::Assistant,
        content: String::new(),
        tool_invocations: vec![ToolInvocation {
            tool_call_id: Uuid::new_v4().to_string(),
            tool_name: tool_name.into(),
            arguments,
            result,
        }],
    }
}
