//! Maps one opaque test input onto the resolved entry point's parameters.
//!
//! Total: adaptation never fails. The worst case is a best-guess
//! single-argument call that the engine then fails naturally.
//!
//! Precedence is load-bearing and must not be reordered (canonical shape >
//! known single-array names > arity>1 spread > arity==1 wrap > raw
//! pass-through): changing it changes which malformed inputs happen to pass.

use crate::resolver::EntryPoint;
use serde_json::{json, Value};

/// Entry points known to take their whole input as one array argument,
/// regardless of what the declared input shape suggests.
const SINGLE_ARRAY_NAMES: [&str; 6] = [
    "maxArea",
    "trap",
    "findPeak",
    "maxProfit",
    "removeElement",
    "removeDuplicates",
];

/// If the value is a string holding JSON, decode it; otherwise keep it
/// as supplied. Decode failure keeps the opaque string.
pub fn decode_value(raw: &Value) -> Value {
    match raw {
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| raw.clone()),
        other => other.clone(),
    }
}

/// The documented fallback pair for the canonical two-argument signature.
/// Almost certainly an artifact of one specific practice problem; kept
/// verbatim for compatibility (see DESIGN.md).
fn canonical_default_args() -> Vec<Value> {
    vec![json!([2, 7, 11, 15]), json!(9)]
}

/// Canonical two-argument shape: `[collection, scalar]`, with a one-level
/// unwrap for `[[collection, scalar]]`.
fn adapt_canonical(input: &Value) -> Vec<Value> {
    match input {
        Value::Array(items) if items.len() >= 2 => {
            vec![items[0].clone(), items[1].clone()]
        }
        Value::Array(items) if items.len() == 1 => match &items[0] {
            Value::Array(nested) if nested.len() >= 2 => {
                vec![nested[0].clone(), nested[1].clone()]
            }
            _ => vec![input.clone(), json!(9)],
        },
        _ => canonical_default_args(),
    }
}

/// Adapt a raw test input to the resolved entry point.
pub fn adapt(raw_input: &Value, entry: &EntryPoint) -> Vec<Value> {
    let input = decode_value(raw_input);

    if entry.canonical {
        return adapt_canonical(&input);
    }

    if SINGLE_ARRAY_NAMES.contains(&entry.name.as_str()) {
        return vec![input];
    }

    match &input {
        Value::Array(_) if entry.arity == 1 => vec![input],
        Value::Array(items) if items.len() > 1 => items.clone(),
        _ => vec![input],
    }
}
