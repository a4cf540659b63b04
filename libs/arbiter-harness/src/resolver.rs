//! Entry-point discovery over raw source text.
//!
//! Heuristic, not a parse: candidates are located with declaration-shaped
//! regexes in a fixed priority order. The canonical `twoSum` signature wins
//! over everything, then the conventional names `solution` and `main`, then
//! the first generically declared function in the source. The ordering is a
//! design decision: a canonical-name match must never be shadowed by a
//! generically named later declaration.
//!
//! Whether the chosen symbol is actually callable is only known inside the
//! execution scope; the engine's generated driver guards on it and the
//! failure surfaces as a per-case "function not found" error.

use crate::error::HarnessError;
use regex::Regex;
use std::sync::OnceLock;

/// Names tried before any generic scan, in priority order.
const PREFERRED_NAMES: [&str; 3] = ["twoSum", "solution", "main"];

/// The callable the harness will invoke for every case of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    /// Number of declared parameters, counted from the declaration text.
    pub arity: usize,
    /// True for the hard-coded canonical problem signature (`twoSum`).
    pub canonical: bool,
}

fn generic_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Named function declaration, variable assigned a function
        // expression, or variable assigned a parenthesized arrow.
        Regex::new(
            r"(?:function\s+(\w+)\s*\(([^)]*)\)|(?:var|let|const)\s+(\w+)\s*=\s*function\s*\(([^)]*)\)|(?:var|let|const)\s+(\w+)\s*=\s*\(([^)]*)\)\s*=>)",
        )
        .expect("declaration regex")
    })
}

fn count_params(param_list: &str) -> usize {
    param_list
        .split(',')
        .filter(|p| !p.trim().is_empty())
        .count()
}

/// Find a declaration of `name` and return its declared arity.
fn find_named(source: &str, name: &str) -> Option<usize> {
    let escaped = regex::escape(name);
    let pattern = format!(
        r"(?:function\s+{n}\s*\(([^)]*)\)|(?:var|let|const)\s+{n}\s*=\s*function\s*\(([^)]*)\)|(?:var|let|const)\s+{n}\s*=\s*\(([^)]*)\)\s*=>)",
        n = escaped
    );
    let re = Regex::new(&pattern).expect("named declaration regex");
    let caps = re.captures(source)?;
    let params = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("");
    Some(count_params(params))
}

/// Locate the single entry point to invoke for this source.
pub fn resolve(source: &str) -> Result<EntryPoint, HarnessError> {
    for name in PREFERRED_NAMES {
        if let Some(arity) = find_named(source, name) {
            return Ok(EntryPoint {
                name: name.to_string(),
                arity,
                canonical: name == "twoSum",
            });
        }
    }

    // Fallback: first declaration of any name, in source order.
    if let Some(caps) = generic_decl_re().captures(source) {
        let (name, params) = if let Some(m) = caps.get(1) {
            (m.as_str(), caps.get(2).map(|p| p.as_str()).unwrap_or(""))
        } else if let Some(m) = caps.get(3) {
            (m.as_str(), caps.get(4).map(|p| p.as_str()).unwrap_or(""))
        } else {
            let m = caps.get(5).expect("arrow name capture");
            (m.as_str(), caps.get(6).map(|p| p.as_str()).unwrap_or(""))
        };
        return Ok(EntryPoint {
            name: name.to_string(),
            arity: count_params(params),
            canonical: false,
        });
    }

    Err(HarnessError::NoEntryPoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_function_declaration() {
        let entry = resolve("function solution(nums) { return nums; }").unwrap();
        assert_eq!(entry.name, "solution");
        assert_eq!(entry.arity, 1);
        assert!(!entry.canonical);
    }

    #[test]
    fn resolves_function_expression_and_arrow() {
        let entry = resolve("const solution = function(a, b) { return a + b; };").unwrap();
        assert_eq!((entry.name.as_str(), entry.arity), ("solution", 2));

        let entry = resolve("let solution = (a, b, c) => a + b + c;").unwrap();
        assert_eq!((entry.name.as_str(), entry.arity), ("solution", 3));
    }

    #[test]
    fn canonical_name_wins_over_solution() {
        // Declaration order does not matter: twoSum outranks solution
        // even when solution is declared first.
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
        let entry = resolve(source).unwrap();
        assert_eq!(entry.name, "twoSum");
        assert_eq!(entry.arity, 2);
        assert!(entry.canonical);
    }

    #[test]
    fn solution_wins_over_main() {
        let source = "function main(x) { return x; }\nfunction solution(x) { return x + 1; }";
        assert_eq!(resolve(source).unwrap().name, "solution");
    }

    #[test]
    fn falls_back_to_first_generic_declaration() {
        let source = "\
const helper = (x) => x * 2;
function addAll(nums) { return nums.reduce((a, b) => a + b, 0); }";
        let entry = resolve(source).unwrap();
        assert_eq!(entry.name, "helper");
        assert_eq!(entry.arity, 1);
    }

    #[test]
    fn zero_arity_counted() {
        let entry = resolve("function answer() { return 42; }").unwrap();
        assert_eq!(entry.arity, 0);
    }

    #[test]
    fn no_declaration_fails() {
        let err = resolve("const x = 42; x + 1;").unwrap_err();
        assert!(err.to_string().contains("No executable function found"));
    }

    #[test]
    fn similar_name_does_not_match_canonical() {
        let entry = resolve("function twoSumBrute(nums, target) { return []; }").unwrap();
        assert_eq!(entry.name, "twoSumBrute");
        assert!(!entry.canonical);
    }
}
