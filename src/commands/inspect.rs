// src/commands/inspect.rs

use anyhow::{Context, Result};

use crate::{
    core::{execution::run_test_case, suite::TestSuite},
    infra::t,
};

/// Runs exactly one (test case, model) pair synchronously and dumps the
/// classified outcome to stdout. Does not touch the status matrix, the live
/// renderer or the durable logger.
pub async fn execute(suite: &TestSuite, model_name: &str, eval_id: &str) -> Result<()> {
    let model = suite.find_model(model_name)?;
    let case = suite.find_eval(eval_id)?;

    println!(
        "{}",
        t!("inspect.running", name = case.name, model = model_name)
    );

    let outcome = run_test_case(suite, case, model.as_ref()).await;
    let rendered =
        serde_json::to_string_pretty(&outcome).context("Failed to render eval outcome")?;
    println!("{rendered}");

    Ok(())
}
