//! Pre-execution sanity checks on submitted source.
//!
//! These are advisory keyword heuristics, not parsing. Rejecting valid
//! code is tolerated but undesired; accepting broken code is expected
//! and handled later by the execution engine.

use crate::error::HarnessError;
use arbiter_common::types::Language;
use regex::Regex;
use std::sync::OnceLock;

const MIN_RESIDUAL_LEN: usize = 10;
const MIN_GENERIC_LEN: usize = 20;

fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex"))
}

fn line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)//.*$").expect("line comment regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// Strip block and line comments and collapse runs of whitespace, leaving
/// a residual string suitable for keyword checks.
fn strip_for_analysis(source: &str) -> String {
    let no_blocks = block_comment_re().replace_all(source, "");
    let no_lines = line_comment_re().replace_all(&no_blocks, "");
    whitespace_re().replace_all(&no_lines, " ").trim().to_string()
}

/// Validate submitted source against its declared language.
///
/// Fatal to the whole run on failure: no test case executes.
pub fn validate(source: &str, language: Language) -> Result<(), HarnessError> {
    if source.trim().is_empty() {
        return Err(HarnessError::Validation("Code cannot be empty".to_string()));
    }

    let clean = strip_for_analysis(source);
    if clean.len() < MIN_RESIDUAL_LEN {
        return Err(HarnessError::Validation(
            "Code appears to be too short or contains only comments".to_string(),
        ));
    }

    match language {
        Language::JavaScript | Language::TypeScript => {
            if !clean.contains("function") && !clean.contains("=>") && !clean.contains('=') {
                return Err(HarnessError::Validation(
                    "No function definition found in JavaScript/TypeScript code".to_string(),
                ));
            }
            if clean.contains("function") && !clean.contains("return") && !clean.contains("=>") {
                return Err(HarnessError::Validation(
                    "Function should return a value. Add a return statement.".to_string(),
                ));
            }
        }
        Language::Python => {
            if !clean.contains("def ") {
                return Err(HarnessError::Validation(
                    "No function definition found. Use \"def function_name():\" syntax".to_string(),
                ));
            }
            if !clean.contains("return") && !clean.contains("print") {
                return Err(HarnessError::Validation(
                    "Function should return a value or print output".to_string(),
                ));
            }
        }
        Language::Java => {
            if !clean.contains("public") || !clean.contains("class") {
                return Err(HarnessError::Validation(
                    "Java code must contain a public class".to_string(),
                ));
            }
            if !clean.contains("return") {
                return Err(HarnessError::Validation(
                    "Java method should return a value".to_string(),
                ));
            }
        }
        Language::Cpp => {
            if !clean.contains("#include") {
                return Err(HarnessError::Validation(
                    "C++ code should include necessary headers".to_string(),
                ));
            }
            if !clean.contains("main") && !clean.contains("return") {
                return Err(HarnessError::Validation(
                    "C++ code should have a main function or return statement".to_string(),
                ));
            }
        }
        // No dedicated rule: length-only check.
        other => {
            if clean.len() < MIN_GENERIC_LEN {
                return Err(HarnessError::Validation(format!(
                    "{} code appears incomplete",
                    other
                )));
            }
        }
    }

    Ok(())
}
