//! Model capability seam.
//!
//! The engine treats a model as an external, possibly-failing asynchronous
//! capability: given a system prompt, tool descriptions and a conversation,
//! it produces text and/or structured tool invocations. Implementations
//! should handle the specifics of each provider's API behind this interface.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::message::Message;
use crate::core::suite::Tool;

/// A structured tool invocation requested by a model in its completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    pub tool_call_id: String,
    pub tool_name: String,
    pub arguments: serde_json::Value,
}

/// Everything a model produced for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text, possibly empty when the model only called tools.
    #[serde(default)]
    pub text: String,
    /// Tool invocations the model requested, in order.
    #[serde(default, rename = "toolCalls")]
    pub tool_calls: Vec<ToolCall>,
}

/// One generation request as handed to a model capability.
///
/// The tool set is descriptive metadata only: by the time a request is
/// issued the suite has already stripped every execute capability.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub system_prompt: &'a str,
    pub tools: &'a BTreeMap<String, Tool>,
    pub messages: &'a [Message],
}

/// Abstract interface over an external model capability.
///
/// Any `Err` returned by [`generate`](Self::generate) is classified as a
/// generation failure by the engine; it is never retried, and the test
/// case's assertion is never invoked for it.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Vendor grouping key (e.g. "openai", "anthropic") used to partition
    /// per-provider concurrency limits.
    fn provider(&self) -> &str;

    /// Produce text and/or tool invocations for the given conversation.
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<Completion>;
}

impl std::fmt::Debug for dyn LanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModel")
            .field("provider", &self.provider())
            .finish_non_exhaustive()
    }
}
