// Shared test helpers for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use eval_matrix::{Completion, GenerateRequest, LanguageModel, TestSuiteBuilder, Tool, ToolCall};
use serde_json::json;

/// What a [`MockModel`] does when asked to generate.
#[derive(Clone)]
pub enum MockBehavior {
    Succeed(Completion),
    Fail(String),
}

/// Tracks how many generations are in flight and the high-water mark.
#[derive(Default)]
pub struct ConcurrencyProbe {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyProbe {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Scripted stand-in for the external model capability.
pub struct MockModel {
    provider: String,
    behavior: MockBehavior,
    delay: Duration,
    probe: Option<Arc<ConcurrencyProbe>>,
}

impl MockModel {
    pub fn succeeding(provider: &str, completion: Completion) -> Self {
        Self {
            provider: provider.to_string(),
            behavior: MockBehavior::Succeed(completion),
            delay: Duration::ZERO,
            probe: None,
        }
    }

    pub fn failing(provider: &str, error: &str) -> Self {
        Self {
            provider: provider.to_string(),
            behavior: MockBehavior::Fail(error.to_string()),
            delay: Duration::ZERO,
            probe: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_probe(mut self, probe: Arc<ConcurrencyProbe>) -> Self {
        self.probe = Some(probe);
        self
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    fn provider(&self) -> &str {
        &self.provider
    }

    async fn generate(&self, _request: GenerateRequest<'_>) -> Result<Completion> {
        if let Some(probe) = &self.probe {
            probe.enter();
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let result = match &self.behavior {
            MockBehavior::Succeed(completion) => Ok(completion.clone()),
            MockBehavior::Fail(error) => Err(anyhow!("{error}")),
        };
        if let Some(probe) = &self.probe {
            probe.exit();
        }
        result
    }
}

/// A completion consisting of exactly one tool call.
pub fn single_tool_call(tool_name: &str, arguments: serde_json::Value) -> Completion {
    Completion {
        text: String::new(),
        tool_calls: vec![ToolCall {
            tool_call_id: "call-0".to_string(),
            tool_name: tool_name.to_string(),
            arguments,
        }],
    }
}

/// A text-only completion.
pub fn text_completion(text: &str) -> Completion {
    Completion {
        text: text.to_string(),
        tool_calls: vec![],
    }
}

/// A builder pre-loaded with the system prompt and the `add` tool the
/// fixture evals expect.
pub fn suite_builder() -> TestSuiteBuilder {
    let mut builder =
        TestSuiteBuilder::new("You are a helpful assistant that can use tools to answer questions.");
    builder.tool(
        "add",
        Tool::new(
            "A tool that can add two numbers",
            json!({
                "type": "object",
                "properties": {
                    "lhs": { "type": "number" },
                    "rhs": { "type": "number" }
                },
                "required": ["lhs", "rhs"]
            }),
        ),
    );
    builder
}
