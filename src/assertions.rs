//! Expectation helpers for writing eval assertions.
//!
//! Assertions follow the anyhow convention: returning `Err` marks the test
//! failed, returning a value marks it passed. `ensure!` and `bail!` compose
//! naturally inside them.

use anyhow::{Result, ensure};

use crate::core::provider::Completion;

/// Asserts that the completion contains exactly one tool call and that it
/// targets `tool_name`, returning the call's arguments for further
/// inspection.
///
/// ```
/// # use anyhow::Result;
/// # use eval_matrix::{Completion, ToolCall, expect_single_tool_call};
/// # fn main() -> Result<()> {
/// # let completion = Completion {
/// #     text: String::new(),
/// #     tool_calls: vec![ToolCall {
/// #         tool_call_id: "call-0".into(),
/// #         tool_name: "add".into(),
/// #         arguments: serde_json::json!({"lhs": 2, "rhs": 4}),
/// #     }],
/// # };
/// let args = expect_single_tool_call(&completion, "add")?;
/// anyhow::ensure!(args["lhs"] == 2);
/// # Ok(())
/// # }
/// ```
pub fn expect_single_tool_call<'a>(
    completion: &'a Completion,
    tool_name: &str,
) -> Result<&'a serde_json::Value> {
    ensure!(
        completion.tool_calls.len() == 1,
        "expected exactly one tool call, got {}",
        completion.tool_calls.len()
    );
    let call = &completion.tool_calls[0];
    ensure!(
        call.tool_name == tool_name,
        "expected a call to tool '{}', got '{}'",
        tool_name,
        call.tool_name
    );
    Ok(&call.arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::ToolCall;
    use serde_json::json;

    fn call(tool_name: &str) -> ToolCall {
        ToolCall {
            tool_call_id: "call-0".to_string(),
            tool_name: tool_name.to_string(),
            arguments: json!({"lhs": 2, "rhs": 4}),
        }
    }

    #[test]
    fn returns_arguments_for_a_single_matching_call() {
        let completion = Completion {
            text: String::new(),
            tool_calls: vec![call("add")],
        };
        let args = expect_single_tool_call(&completion, "add").unwrap();
        assert_eq!(args["lhs"], 2);
        assert_eq!(args["rhs"], 4);
    }

    #[test]
    fn rejects_zero_calls() {
        let completion = Completion::default();
        let err = expect_single_tool_call(&completion, "add").unwrap_err();
        assert!(err.to_string().contains("exactly one tool call"));
    }

    #[test]
    fn rejects_multiple_calls() {
        let completion = Completion {
            text: String::new(),
            tool_calls: vec![call("add"), call("add")],
        };
        assert!(expect_single_tool_call(&completion, "add").is_err());
    }

    #[test]
    fn rejects_a_call_to_the_wrong_tool() {
        let completion = Completion {
            text: String::new(),
            tool_calls: vec![call("subtract")],
        };
        let err = expect_single_tool_call(&completion, "add").unwrap_err();
        assert!(err.to_string().contains("'add'"));
    }
}
