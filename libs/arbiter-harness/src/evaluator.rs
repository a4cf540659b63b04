//! Verdict logic: structural result comparison and batch aggregation.
//!
//! Knows nothing about how code executes. Pure functions:
//! (actual, expected) -> pass/fail, (case results) -> batch result.

use arbiter_common::types::{BatchResult, CaseResult};
use serde_json::Value;

const NUMERIC_EPSILON: f64 = 1e-9;

/// Type-aware deep equality between an actual and an expected value.
///
/// Total: never fails. Sequences are order-sensitive and element-wise;
/// mappings compare by sorted key set and per-key recursion; numbers use
/// an absolute epsilon (intentional for small practice-problem answers);
/// strings compare trimmed, case-sensitive. Mixed types fall back to a
/// trimmed stringification, a deliberate and lossy last resort.
pub fn values_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Array(a), Value::Array(e)) => {
            a.len() == e.len() && a.iter().zip(e.iter()).all(|(x, y)| values_match(x, y))
        }
        (Value::Object(a), Value::Object(e)) => {
            let mut a_keys: Vec<&String> = a.keys().collect();
            let mut e_keys: Vec<&String> = e.keys().collect();
            a_keys.sort();
            e_keys.sort();
            a_keys == e_keys && a.iter().all(|(k, v)| values_match(v, &e[k.as_str()]))
        }
        (Value::Number(a), Value::Number(e)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let e = e.as_f64().unwrap_or(f64::NAN);
            (a - e).abs() < NUMERIC_EPSILON
        }
        (Value::String(a), Value::String(e)) => a.trim() == e.trim(),
        (Value::Bool(a), Value::Bool(e)) => a == e,
        _ => stringify(actual) == stringify(expected),
    }
}

/// Trimmed textual form used by the mixed-type fallback.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Fold per-case verdicts into the batch summary.
///
/// Invariants: `passed_tests` counts the passing results and
/// `total_tests` equals the submitted case count.
pub fn aggregate(results: Vec<CaseResult>, total_tests: usize) -> BatchResult {
    let passed_tests = results.iter().filter(|r| r.passed).count();
    BatchResult {
        success: true,
        error: None,
        results,
        total_tests,
        passed_tests,
    }
}
