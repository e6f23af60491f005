// src/commands/benchmark.rs

use std::env;
use std::path::Path;

use anyhow::Result;
use tokio::signal;
use uuid::Uuid;

use crate::{
    core::{config::RunnerConfig, execution::run_benchmark, planner::plan_run, suite::TestSuite},
    infra::{log::EvalLogWriter, t, term},
    reporting::console::{RunContext, print_failure_details, print_summary},
};

/// Runs the full (or filtered) benchmark: every selected (test case, model)
/// pair, fanned out per provider, with the live status display and one
/// durable log record per pair.
pub async fn execute(
    suite: &TestSuite,
    models: Vec<String>,
    limit: usize,
    verbose: bool,
    randomize: bool,
    config_path: &Path,
) -> Result<()> {
    let config = RunnerConfig::load(config_path)?;
    // An explicit --lang wins over the config file's language.
    if env::args().all(|arg| arg != "--lang") {
        if let Some(lang) = &config.language {
            rust_i18n::set_locale(lang);
        }
    }
    let locale = rust_i18n::locale().to_string();

    let plan = plan_run(suite, &models, limit, randomize, None)?;

    let session_id = Uuid::new_v4().to_string();
    let writer = EvalLogWriter::create(&config.log_dir, &session_id).await?;

    let case_names: Vec<String> = plan.cases.iter().map(|case| case.name.clone()).collect();
    let ctx = RunContext::new(
        session_id,
        writer.path().to_path_buf(),
        case_names,
        plan.model_names.clone(),
    );

    // Restore the cursor if the operator interrupts the run. In-flight
    // generations are not cancelled; the process just exits.
    tokio::spawn(async {
        if signal::ctrl_c().await.is_ok() {
            term::show_cursor();
            std::process::exit(130);
        }
    });

    term::hide_cursor();
    ctx.render_now();

    let run_result = run_benchmark(suite, &plan, &ctx, &writer, config.max_concurrency).await;

    // The cursor comes back before any error propagates.
    term::show_cursor();
    let records = run_result?;

    let (case_names, model_names) = ctx.labels();
    print_summary(&case_names, &model_names, &ctx.snapshot(), &locale);
    println!(
        "{}",
        t!("summary.log_file", locale = locale, path = writer.path().display())
    );
    if verbose {
        print_failure_details(&records, &locale);
    }

    Ok(())
}
