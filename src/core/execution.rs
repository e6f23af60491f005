//! # Benchmark Execution Engine Module / 基准测试执行引擎模块
//!
//! This module provides the core functionality for executing evals.
//! It drives one (test case, model) pair through generation, assertion and
//! classification, and fans the full cross product out across per-provider
//! bounded-concurrency queues.
//!
//! 此模块为执行评测提供核心功能。
//! 它驱动单个（测试用例，模型）组合完成生成、断言和分类，
//! 并将完整的笛卡尔积分发到按提供商划分的有界并发队列上。

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use futures::{StreamExt, future, stream};

use crate::{
    core::{
        models::{EvalOutcome, LogRecord, Status},
        planner::ExecutionPlan,
        provider::{GenerateRequest, LanguageModel},
        suite::{TestCase, TestSuite},
    },
    infra::{log::EvalLogWriter, t},
    reporting::console::RunContext,
};

/// Runs one (test case, model) pair: invoke the model capability, then the
/// test case's assertion, producing a classified outcome.
///
/// A generation error short-circuits: the assertion is never invoked and the
/// outcome carries only the error text. Neither step is ever retried.
///
/// 运行单个（测试用例，模型）组合：调用模型能力，然后运行测试用例的断言，
/// 产生一个分类结果。生成错误会短路：断言不会被调用，结果只携带错误文本。
/// 两个步骤都不会重试。
pub async fn run_test_case(
    suite: &TestSuite,
    case: &TestCase,
    model: &dyn LanguageModel,
) -> EvalOutcome {
    let request = GenerateRequest {
        system_prompt: suite.system_prompt(),
        tools: suite.tools(),
        messages: &case.messages,
    };

    let completion = match model.generate(request).await {
        Ok(completion) => completion,
        Err(e) => {
            return EvalOutcome::FailedToGenerate {
                completion_error: format!("Error generating completion: {e:#}"),
            };
        }
    };

    match (case.assertion)(completion.clone()).await {
        Ok(()) => EvalOutcome::TestPassed { completion },
        Err(e) => EvalOutcome::TestFailed {
            completion,
            test_error: format!("Error running test: {e:#}"),
        },
    }
}

/// One scheduled (test case, model) pair with its coordinates in the
/// status matrix.
struct ScheduledUnit<'a> {
    row: usize,
    col: usize,
    case: &'a TestCase,
    model_name: &'a str,
    model: &'a Arc<dyn LanguageModel>,
}

/// Fans the full (test case × model) cross product out across per-provider
/// queues, each bounded at `max_concurrency` simultaneously running units.
/// The queues themselves all run concurrently with each other; there is no
/// global cap, so providers cannot starve each other.
///
/// Resolves only when every queue has drained, i.e. every scheduled pair has
/// reached exactly one terminal status and its durable record is written.
/// Returns the records in completion order. A logger I/O error aborts the
/// whole run: results that cannot be durably recorded must not be silently
/// dropped.
///
/// 将完整的（测试用例 × 模型）笛卡尔积分发到按提供商划分的队列上，
/// 每个队列最多有 `max_concurrency` 个同时运行的单元。
/// 队列之间完全并发运行，没有全局上限，因此提供商之间不会相互饿死。
/// 仅当每个队列都排空后才返回。日志 I/O 错误会中止整个运行。
pub async fn run_benchmark(
    suite: &TestSuite,
    plan: &ExecutionPlan,
    ctx: &RunContext,
    writer: &EvalLogWriter,
    max_concurrency: usize,
) -> Result<Vec<LogRecord>> {
    // Enumerate pairs models-outer, cases-inner: submission order within a
    // partition follows enumeration order.
    let mut partitions: BTreeMap<String, Vec<ScheduledUnit<'_>>> = BTreeMap::new();
    for (col, model_name) in plan.model_names.iter().enumerate() {
        let model = suite.find_model(model_name)?;
        for (row, case) in plan.cases.iter().enumerate() {
            partitions
                .entry(model.provider().to_string())
                .or_default()
                .push(ScheduledUnit {
                    row,
                    col,
                    case,
                    model_name,
                    model,
                });
        }
    }

    let queues = partitions.into_iter().map(|(provider, units)| async move {
        ctx.log(t!(
            "run.queue_started",
            provider = provider,
            count = units.len(),
            limit = max_concurrency
        ));
        let results: Vec<Result<LogRecord>> =
            stream::iter(units.into_iter().map(|unit| run_unit(suite, unit, ctx, writer)))
                .buffer_unordered(max_concurrency.max(1))
                .collect()
                .await;
        ctx.log(t!("run.queue_finished", provider = provider));
        results.into_iter().collect::<Result<Vec<_>>>()
    });

    let per_provider = future::try_join_all(queues).await?;
    Ok(per_provider.into_iter().flatten().collect())
}

/// Drives one scheduled unit through its full state machine:
/// `WAITING → RUNNING →` terminal status, then the awaited durable append.
/// The unit only counts as finished once its record is durable.
async fn run_unit<'a>(
    suite: &TestSuite,
    unit: ScheduledUnit<'a>,
    ctx: &RunContext,
    writer: &EvalLogWriter,
) -> Result<LogRecord> {
    ctx.set_status(unit.row, unit.col, Status::Running);
    ctx.log(t!(
        "run.unit_running",
        name = unit.case.name,
        model = unit.model_name
    ));

    let outcome = run_test_case(suite, unit.case, unit.model.as_ref()).await;

    ctx.set_status(unit.row, unit.col, outcome.status());
    match outcome.error_text() {
        None => ctx.log(t!(
            "run.unit_passed",
            name = unit.case.name,
            model = unit.model_name
        )),
        Some(error) => ctx.log(t!(
            "run.unit_failed",
            name = unit.case.name,
            model = unit.model_name,
            kind = outcome.type_name(),
            error = error
        )),
    }

    let record = LogRecord {
        test_case: unit.case.name.clone(),
        model: unit.model_name.to_string(),
        messages: unit.case.messages.clone(),
        result: outcome,
    };
    writer.append(&record).await?;
    Ok(record)
}
