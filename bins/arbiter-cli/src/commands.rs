// CLI commands: load a submission, drive the harness, render verdicts
use anyhow::{bail, Context, Result};
use arbiter_common::types::{Language, RunRequest, TestCase};
use arbiter_harness::{Harness, HarnessConfig};
use std::fs;
use std::path::Path;

fn parse_language(language: &str) -> Result<Language> {
    language.parse::<Language>().map_err(|e| {
        anyhow::anyhow!(
            "{}. Valid options: javascript, typescript, python, java, cpp, csharp, go, rust",
            e
        )
    })
}

fn load_test_cases(path: &str) -> Result<Vec<TestCase>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read test file: {}", path))?;
    let cases: Vec<TestCase> = serde_json::from_str(&content)
        .context("Test file must be a JSON array of {\"input\", \"expected\"} objects")?;
    if cases.is_empty() {
        bail!("Test file contains no test cases");
    }
    Ok(cases)
}

/// Grade a submission and print per-case verdicts. Returns whether the
/// whole batch passed.
pub async fn run(
    source_path: &str,
    language: &str,
    tests_path: &str,
    config_path: Option<&str>,
    timeout_ms: Option<u64>,
    as_json: bool,
) -> Result<bool> {
    let language = parse_language(language)?;
    let source_code = fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read source file: {}", source_path))?;
    let test_cases = load_test_cases(tests_path)?;

    let mut config = match config_path {
        Some(path) => HarnessConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load harness config: {}", path))?,
        None => HarnessConfig::default(),
    };
    if let Some(timeout_ms) = timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let harness = Harness::new(config)?;

    let request = RunRequest::new(language, source_code, test_cases);
    let batch = harness.run(&request).await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(batch.success && batch.passed_tests == batch.total_tests);
    }

    if !batch.success {
        println!("✗ Run aborted: {}", batch.error.as_deref().unwrap_or("unknown error"));
        return Ok(false);
    }

    println!("→ Graded {} test cases ({})", batch.total_tests, language);
    if !language.has_native_backend() {
        println!("  ⚠ {} has no execution backend; verdicts are simulated", language);
    }
    println!();

    for result in &batch.results {
        let mark = if result.passed { "✓" } else { "✗" };
        println!(
            "  {} Test {} ({}ms)",
            mark,
            result.index + 1,
            result.execution_time_ms
        );
        if let Some(error) = &result.error {
            println!("    Error: {}", error);
        } else if !result.passed {
            println!("    Expected: {}", result.expected);
            println!("    Got:      {}", result.actual);
        }
        if !result.logs.is_empty() {
            println!("    Logs: {}", result.logs.lines().next().unwrap_or(""));
        }
    }

    println!();
    println!("→ {} / {} passed", batch.passed_tests, batch.total_tests);

    Ok(batch.passed_tests == batch.total_tests)
}

/// Validate a submission without executing anything.
pub fn check(source_path: &str, language: &str) -> Result<()> {
    let language = parse_language(language)?;
    let source_code = fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read source file: {}", source_path))?;

    match arbiter_harness::validator::validate(&source_code, language) {
        Ok(()) => {
            println!("✓ Source passes {} validation checks", language);
            Ok(())
        }
        Err(e) => bail!("Validation failed: {}", e),
    }
}
