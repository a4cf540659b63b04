//! End-to-end harness tests across the orchestrated pipeline.
//!
//! Tests on the simulated paths run everywhere; tests that genuinely
//! execute JavaScript need a Node.js binary and are ignored by default.

use crate::config::HarnessConfig;
use crate::runner::Harness;
use arbiter_common::types::{Language, RunRequest, TestCase};
use serde_json::json;

fn quick_harness() -> Harness {
    Harness::new(HarnessConfig {
        simulated_delay_ms: 1,
        ..HarnessConfig::default()
    })
    .unwrap()
}

fn case(input: serde_json::Value, expected: serde_json::Value) -> TestCase {
    TestCase { input, expected }
}

#[tokio::test]
async fn validation_failure_aborts_before_any_case() {
    let harness = quick_harness();
    let request = RunRequest::new(
        Language::JavaScript,
        "function solution(",
        vec![case(json!("[1,2,3]"), json!(6))],
    );

    let batch = harness.run(&request).await;
    assert!(!batch.success);
    assert!(batch.results.is_empty());
    assert_eq!(batch.total_tests, 0);
    assert!(batch.error.is_some());
}

#[tokio::test]
async fn simulated_python_run_grades_every_case() {
    let harness = quick_harness();
    let source = "def solve(nums):\n    total = 0\n    for n in nums:\n        total += n\n    return total";
    let request = RunRequest::new(
        Language::Python,
        source,
        vec![
            case(json!([1, 2, 3]), json!(6)),
            case(json!([10]), json!(10)),
        ],
    );

    let batch = harness.run(&request).await;
    assert!(batch.success);
    assert_eq!(batch.total_tests, 2);
    assert_eq!(batch.passed_tests, 2);
    assert_eq!(batch.results.len(), 2);
    for (i, result) in batch.results.iter().enumerate() {
        assert_eq!(result.index, i);
        assert!(result.passed);
        assert!(result.logs.contains("Python execution"));
        assert!(result.error.is_none());
    }
}

#[tokio::test]
async fn simulated_failure_is_case_local_and_batch_completes() {
    let harness = quick_harness();
    // Passes validation (def + print) but the simulation rejects it:
    // no return statement.
    let source = "def solve(nums):\n    print(nums)";
    let request = RunRequest::new(
        Language::Python,
        source,
        vec![case(json!([1]), json!(1)), case(json!([2]), json!(2))],
    );

    let batch = harness.run(&request).await;
    assert!(batch.success);
    assert_eq!(batch.results.len(), 2);
    assert_eq!(batch.passed_tests, 0);
    for result in &batch.results {
        assert!(!result.passed);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("Python execution error"));
    }
}

#[tokio::test]
async fn missing_entry_point_fails_each_case_without_aborting() {
    let harness = quick_harness();
    // Valid enough for the validator (has an assignment, long enough)
    // but declares no callable at all.
    let request = RunRequest::new(
        Language::JavaScript,
        "const answer = 42; // no callable here",
        vec![case(json!(1), json!(1)), case(json!(2), json!(2))],
    );

    let batch = harness.run(&request).await;
    assert!(batch.success);
    assert_eq!(batch.results.len(), 2);
    assert_eq!(batch.passed_tests, 0);
    for result in &batch.results {
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("No executable function found"));
    }
}

#[tokio::test]
async fn string_encoded_expected_values_are_decoded() {
    let harness = quick_harness();
    let source = "def solve(nums):\n    if nums:\n        return nums\n    return []";
    let request = RunRequest::new(
        Language::Python,
        source,
        vec![case(json!("[1,2]"), json!("[1,2]"))],
    );

    let batch = harness.run(&request).await;
    assert!(batch.results[0].passed);
    assert_eq!(batch.results[0].expected, json!([1, 2]));
    assert_eq!(batch.results[0].input, json!([1, 2]));
}

#[tokio::test]
#[ignore] // Requires a Node.js binary on PATH
async fn javascript_sum_scenario_passes_end_to_end() {
    let harness = quick_harness();
    let request = RunRequest::new(
        Language::JavaScript,
        "function solution(nums){ return nums.reduce((a,b)=>a+b,0); }",
        vec![case(json!("[1,2,3]"), json!(6)), case(json!("[10]"), json!(10))],
    );

    let batch = harness.run(&request).await;
    assert!(batch.success);
    assert_eq!(batch.total_tests, 2);
    assert_eq!(batch.passed_tests, 2);
    assert_eq!(batch.results[0].actual, json!(6));
    assert_eq!(batch.results[1].actual, json!(10));
}

#[tokio::test]
#[ignore] // Requires a Node.js binary on PATH
async fn canonical_entry_point_beats_generic_solution() {
    let harness = quick_harness();
    let source = "\
function solution(nums) { return nums; }
function twoSum(nums, target) {
  for (let i = 0; i < nums.length; i++) {
    for (let j = i + 1; j < nums.length; j++) {
      if (nums[i] + nums[j] === target) return [i, j];
    }
  }
  return [];
}";
    let request = RunRequest::new(
        Language::JavaScript,
        source,
        vec![case(json!([[2, 7, 11, 15], 9]), json!([0, 1]))],
    );

    let batch = harness.run(&request).await;
    assert!(batch.results[0].passed, "twoSum must be invoked, not solution");
    assert_eq!(batch.results[0].actual, json!([0, 1]));
}

#[tokio::test]
#[ignore] // Requires a Node.js binary on PATH
async fn infinite_loop_times_out_without_aborting_batch() {
    let harness = Harness::new(HarnessConfig {
        timeout_ms: 500,
        simulated_delay_ms: 1,
        ..HarnessConfig::default()
    })
    .unwrap();
    let request = RunRequest::new(
        Language::JavaScript,
        "function solution(n){ while (true) {} return n; }",
        vec![case(json!(1), json!(1)), case(json!(2), json!(2))],
    );

    let batch = harness.run(&request).await;
    assert!(batch.success);
    assert_eq!(batch.results.len(), 2);
    for result in &batch.results {
        assert!(!result.passed);
        assert!(result.error.as_deref().unwrap().contains("timeout"));
    }
}
