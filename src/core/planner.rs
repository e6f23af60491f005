//! # Run Planner Module / 运行计划模块
//!
//! This module materializes the inputs for one benchmark run: resolving the
//! selected model identifiers, optionally shuffling the test-case order with
//! a seedable permutation, and applying the eval-count limit.
//!
//! 此模块物化单次基准测试运行的输入：解析所选的模型标识符、
//! 使用可设种子的置换算法随机打乱测试用例顺序（可选），并应用评测数量限制。

use anyhow::Result;

use crate::core::suite::{TestCase, TestSuite};

/// Represents the materialized inputs for one benchmark run.
/// 表示单次基准测试运行的物化输入。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// Model identifiers, sorted and deduplicated; one status-matrix column
    /// each. / 模型标识符，已排序并去重；每个对应状态矩阵的一列。
    pub model_names: Vec<String>,
    /// Test cases in final submission order; one status-matrix row each.
    /// 最终提交顺序的测试用例；每个对应状态矩阵的一行。
    pub cases: Vec<TestCase>,
    /// Whether the case order was shuffled. / 用例顺序是否被打乱。
    pub randomized: bool,
}

/// Creates the execution plan for a benchmark run.
///
/// Model names are sorted, deduplicated and resolved up front, so an unknown
/// identifier aborts before any execution. An empty selection means every
/// registered model. The shuffle (if requested) is applied before the limit,
/// so `--limit` draws a sample rather than a prefix.
///
/// # Arguments
/// * `suite` - The frozen test suite
/// * `selected_models` - Model identifiers to benchmark; empty selects all
/// * `limit` - Maximum number of test cases to run; `0` means no limit
/// * `randomize` - Whether to shuffle the test-case order
/// * `seed` - Shuffle seed; `None` derives one from the clock
pub fn plan_run(
    suite: &TestSuite,
    selected_models: &[String],
    limit: usize,
    randomize: bool,
    seed: Option<u64>,
) -> Result<ExecutionPlan> {
    let mut model_names: Vec<String> = if selected_models.is_empty() {
        suite.model_identifiers()
    } else {
        selected_models.to_vec()
    };
    model_names.sort();
    model_names.dedup();
    for name in &model_names {
        suite.find_model(name)?;
    }

    let mut cases: Vec<TestCase> = suite.tests().to_vec();
    if randomize {
        shuffle_cases(&mut cases, seed.unwrap_or_else(entropy_seed));
    }
    if limit > 0 && cases.len() > limit {
        cases.truncate(limit);
    }

    Ok(ExecutionPlan {
        model_names,
        cases,
        randomized: randomize,
    })
}

/// In-place Fisher-Yates shuffle driven by a simple LCG PRNG.
/// The same seed always yields the same permutation.
///
/// 由简单 LCG 伪随机数生成器驱动的原地 Fisher-Yates 洗牌。
/// 相同的种子总是产生相同的排列。
pub fn shuffle_cases(cases: &mut [TestCase], seed: u64) {
    let mut state = seed;
    for i in (1..cases.len()).rev() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        cases.swap(i, j);
    }
}

/// Clock-derived seed for unseeded shuffles.
fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9_7f4a_7c15)
}
