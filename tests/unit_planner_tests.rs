//! # Planner Module Unit Tests / Planner 模块单元测试
//!
//! Selection, shuffle and limit behavior of the run planner.
//!
//! 运行计划器的选择、洗牌和数量限制行为。

mod common;

use eval_matrix::TestSuite;
use eval_matrix::core::planner::{plan_run, shuffle_cases};

use common::{MockModel, suite_builder, text_completion};

/// A suite with `n` evals named `eval-00 .. eval-(n-1)` and two models.
fn fixture_suite(n: usize) -> TestSuite {
    let mut builder = suite_builder();
    for i in 0..n {
        builder
            .eval(format!("eval-{i:02}"), |_completion| async move { Ok(()) })
            .unwrap();
    }
    builder.model("beta", MockModel::succeeding("p", text_completion("hi")));
    builder.model("alpha", MockModel::succeeding("q", text_completion("hi")));
    builder.build()
}

fn case_names(suite: &TestSuite, limit: usize, randomize: bool, seed: Option<u64>) -> Vec<String> {
    let plan = plan_run(suite, &[], limit, randomize, seed).unwrap();
    plan.cases.iter().map(|c| c.name.clone()).collect()
}

#[cfg(test)]
mod shuffle_tests {
    use super::*;

    #[test]
    fn shuffling_preserves_the_element_set() {
        let suite = fixture_suite(10);
        let mut shuffled = case_names(&suite, 0, true, Some(42));
        let mut original = case_names(&suite, 0, false, None);

        assert_eq!(shuffled.len(), original.len());
        shuffled.sort();
        original.sort();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn same_seed_yields_the_same_order() {
        let suite = fixture_suite(10);
        let a = case_names(&suite, 0, true, Some(42));
        let b = case_names(&suite, 0, true, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_yield_different_orders() {
        let suite = fixture_suite(10);
        let a = case_names(&suite, 0, true, Some(42));
        let b = case_names(&suite, 0, true, Some(99));
        // 10! orders; a collision would be astronomically unlikely.
        assert_ne!(a, b);
    }

    #[test]
    fn shuffle_of_one_or_zero_cases_is_a_no_op() {
        let suite = fixture_suite(1);
        assert_eq!(case_names(&suite, 0, true, Some(7)), vec!["eval-00"]);

        let mut empty: Vec<eval_matrix::TestCase> = Vec::new();
        shuffle_cases(&mut empty, 7);
        assert!(empty.is_empty());
    }
}

#[cfg(test)]
mod plan_tests {
    use super::*;

    #[test]
    fn declared_order_is_preserved_without_randomize() {
        let suite = fixture_suite(5);
        assert_eq!(
            case_names(&suite, 0, false, None),
            vec!["eval-00", "eval-01", "eval-02", "eval-03", "eval-04"]
        );
    }

    #[test]
    fn limit_truncates_the_run_set() {
        let suite = fixture_suite(5);
        assert_eq!(
            case_names(&suite, 3, false, None),
            vec!["eval-00", "eval-01", "eval-02"]
        );
    }

    #[test]
    fn limit_zero_runs_everything() {
        let suite = fixture_suite(5);
        assert_eq!(case_names(&suite, 0, false, None).len(), 5);
    }

    #[test]
    fn limit_larger_than_the_suite_is_harmless() {
        let suite = fixture_suite(3);
        assert_eq!(case_names(&suite, 100, false, None).len(), 3);
    }

    #[test]
    fn shuffle_applies_before_the_limit() {
        let suite = fixture_suite(10);
        let full = case_names(&suite, 0, true, Some(42));
        let limited = case_names(&suite, 4, true, Some(42));
        assert_eq!(limited, full[..4]);
    }

    #[test]
    fn empty_selection_means_every_model_sorted() {
        let suite = fixture_suite(1);
        let plan = plan_run(&suite, &[], 0, false, None).unwrap();
        assert_eq!(plan.model_names, vec!["alpha", "beta"]);
    }

    #[test]
    fn selected_models_are_sorted_and_deduplicated() {
        let suite = fixture_suite(1);
        let selection = vec![
            "beta".to_string(),
            "alpha".to_string(),
            "beta".to_string(),
        ];
        let plan = plan_run(&suite, &selection, 0, false, None).unwrap();
        assert_eq!(plan.model_names, vec!["alpha", "beta"]);
    }

    #[test]
    fn unknown_model_identifiers_abort_planning() {
        let suite = fixture_suite(1);
        let selection = vec!["missing".to_string()];
        let err = plan_run(&suite, &selection, 0, false, None).unwrap_err();
        assert_eq!(err.to_string(), "Model not found: missing");
    }
}
