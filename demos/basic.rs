//! Minimal demo suite: one tool, one eval, scripted stand-in models.
//!
//! Run with:
//! ```text
//! cargo run --example basic -- benchmark
//! cargo run --example basic -- inspect --model good --eval-id "What is 2 + 4?"
//! ```

use anyhow::{Result, ensure};
use async_trait::async_trait;
use eval_matrix::{
    Completion, GenerateRequest, LanguageModel, TestSuiteBuilder, Tool, ToolCall,
    expect_single_tool_call,
};
use serde_json::json;

/// Scripted stand-in for a real provider client. In a real suite you would
/// register the same model handles your production code uses; eval-matrix
/// only needs the [`LanguageModel`] trait.
struct ScriptedModel {
    provider: &'static str,
    completion: Completion,
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn provider(&self) -> &str {
        self.provider
    }

    async fn generate(&self, _request: GenerateRequest<'_>) -> Result<Completion> {
        Ok(self.completion.clone())
    }
}

fn add_call(lhs: i64, rhs: i64) -> Completion {
    Completion {
        text: String::new(),
        tool_calls: vec![ToolCall {
            tool_call_id: "call-1".to_string(),
            tool_name: "add".to_string(),
            arguments: json!({ "lhs": lhs, "rhs": rhs }),
        }],
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    eval_matrix::init();

    // Typically you would import your tools from elsewhere in your codebase;
    // ideally the exact same definitions your production code registers.
    let mut suite = TestSuiteBuilder::new(
        "You are a helpful assistant that can use tools to answer questions.",
    );
    suite.tool(
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

    suite.model(
        "good",
        ScriptedModel {
            provider: "demo",
            completion: add_call(2, 4),
        },
    );
    suite.model(
        "off-by-one",
        ScriptedModel {
            provider: "demo",
            completion: add_call(2, 5),
        },
    );

    suite.eval("What is 2 + 4?", |completion| async move {
        let args = expect_single_tool_call(&completion, "add")?;
        ensure!(args["lhs"] == 2, "lhs should be 2, got {}", args["lhs"]);
        ensure!(args["rhs"] == 4, "rhs should be 4, got {}", args["rhs"]);
        Ok(())
    })?;

    eval_matrix::run(suite.build()).await
}
