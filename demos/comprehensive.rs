//! A fuller demo suite: several tools, multi-turn fixtures built from
//! synthetic tool calls, and models spread across two providers.
//!
//! Run with:
//! ```text
//! cargo run --example comprehensive -- benchmark --verbose
//! ```

use anyhow::{Result, bail, ensure};
use async_trait::async_trait;
use eval_matrix::{
    Completion, GenerateRequest, LanguageModel, Scenario, TestSuiteBuilder, Tool, ToolCall,
    expect_single_tool_call, tool_call, user,
};
use serde_json::json;

/// Keyword-routed stand-in model: picks a canned completion by looking at
/// the last message and the seeded tool history. Real suites plug their
/// production provider clients in here instead.
struct RoutedModel {
    provider: &'static str,
    /// Whether this stand-in bothers to read seeded tool history.
    follows_history: bool,
}

fn single_call(tool_name: &str, arguments: serde_json::Value) -> Completion {
    Completion {
        text: String::new(),
        tool_calls: vec![ToolCall {
            tool_call_id: "call-1".to_string(),
            tool_name: tool_name.to_string(),
            arguments,
        }],
    }
}

#[async_trait]
impl LanguageModel for RoutedModel {
    fn provider(&self) -> &str {
        self.provider
    }

    async fn generate(&self, request: GenerateRequest<'_>) -> Result<Completion> {
        let seeded_calls: Vec<&str> = request
            .messages
            .iter()
            .flat_map(|m| m.tool_invocations.iter())
            .map(|inv| inv.tool_name.as_str())
            .collect();
        let Some(last) = request.messages.last() else {
            bail!("empty conversation");
        };

        if last.content.contains("1337 * 42") {
            return Ok(single_call(
                "calculator",
                json!({ "operation": "multiply", "numbers": [1337, 42] }),
            ));
        }
        if self.follows_history && seeded_calls.contains(&"weather") {
            return Ok(Completion {
                text: "It is 20°C and sunny at your location.".to_string(),
                tool_calls: vec![],
            });
        }
        if self.follows_history && seeded_calls.contains(&"getUserLocation") {
            return Ok(single_call(
                "weather",
                json!({ "latitude": 42, "longitude": 84 }),
            ));
        }
        if last.content.contains("weather") || last.content.contains("lat/long") {
            return Ok(single_call("getUserLocation", json!({})));
        }
        bail!("no canned route for: {}", last.content)
    }
}

fn build_tools(suite: &mut TestSuiteBuilder) {
    suite.tool(
        "calculator",
        Tool::new(
            "A tool that can perform basic arithmetic operations",
            json!({
                "type": "object",
                "properties": {
                    "operation": { "enum": ["add", "subtract", "multiply", "divide"] },
                    "numbers": { "type": "array", "items": { "type": "number" } }
                },
                "required": ["operation", "numbers"]
            }),
        ),
    );
    suite.tool(
        "weather",
        Tool::new(
            "A tool that can get the weather for a given lat/long pair",
            json!({
                "type": "object",
                "properties": {
                    "latitude": { "type": "number" },
                    "longitude": { "type": "number" }
                },
                "required": ["latitude", "longitude"]
            }),
        ),
    );
    suite.tool(
        "getUserLocation",
        Tool::new(
            "A tool that can get the user's current location (lat/long)",
            json!({ "type": "object", "properties": {} }),
        ),
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    eval_matrix::init();

    let mut suite = TestSuiteBuilder::new(
        "You are a helpful assistant that can use tools to answer questions.",
    );
    build_tools(&mut suite);

    suite.model(
        "routed-large",
        RoutedModel {
            provider: "acme",
            follows_history: true,
        },
    );
    suite.model(
        "routed-small",
        RoutedModel {
            provider: "acme",
            follows_history: false,
        },
    );
    suite.model(
        "routed-rival",
        RoutedModel {
            provider: "rival",
            follows_history: true,
        },
    );

    suite.eval("What is 1337 * 42?", |completion| async move {
        let args = expect_single_tool_call(&completion, "calculator")?;
        ensure!(args["operation"] == "multiply");
        ensure!(args["numbers"] == json!([1337, 42]));
        Ok(())
    })?;

    suite.eval("What is my current lat/long?", |completion| async move {
        expect_single_tool_call(&completion, "getUserLocation")?;
        Ok(())
    })?;

    suite.eval(
        Scenario::named(
            "should start by getting the users lat/long",
            vec![user("What is the weather in my current location?")],
        ),
        |completion| async move {
            expect_single_tool_call(&completion, "getUserLocation")?;
            Ok(())
        },
    )?;

    suite.eval(
        Scenario::named(
            "should use the users lat/long to get the weather",
            vec![
                user("What is the weather in my current location?"),
                tool_call(
                    "getUserLocation",
                    json!({}),
                    json!({ "latitude": 42, "longitude": 84 }),
                ),
            ],
        ),
        |completion| async move {
            let args = expect_single_tool_call(&completion, "weather")?;
            ensure!(args["latitude"] == 42);
            ensure!(args["longitude"] == 84);
            Ok(())
        },
    )?;

    suite.eval(
        Scenario::named(
            "should tell the user the weather",
            vec![
                user("What is the weather in my current location?"),
                tool_call(
                    "getUserLocation",
                    json!({}),
                    json!({ "latitude": 42, "longitude": 84 }),
                ),
                tool_call(
                    "weather",
                    json!({ "latitude": 42, "longitude": 84 }),
                    json!({ "temperature": 20, "condition": "sunny" }),
                ),
            ],
        ),
        |completion| async move {
            ensure!(
                completion.text.contains("sunny"),
                "completion should mention the weather, got: {}",
                completion.text
            );
            Ok(())
        },
    )?;

    eval_matrix::run(suite.build()).await
}
