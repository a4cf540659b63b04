//! Run orchestration: validate once, then drive every test case through
//! adaptation, resolution, execution, and comparison.
//!
//! Case failures are isolated; a run that passes validation always yields
//! exactly one result per submitted case, in input order. Cases execute
//! strictly sequentially. The per-process log isolation in the engine
//! would allow parallel cases (re-sorted by index before returning), but
//! this orchestrator does not exercise that.

use crate::adapter;
use crate::config::HarnessConfig;
use crate::engine::{Engine, ExecutionOutcome};
use crate::error::HarnessError;
use crate::evaluator::{self, values_match};
use crate::resolver::{self, EntryPoint};
use crate::validator;
use arbiter_common::types::{BatchResult, CaseResult, RunRequest, TestCase};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// The grading harness. One instance can serve many runs.
pub struct Harness {
    engine: Engine,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self {
            engine: Engine::new(config)?,
        })
    }

    pub fn with_defaults() -> Result<Self, HarnessError> {
        Self::new(HarnessConfig::default())
    }

    /// Grade one submission against its test-case batch.
    ///
    /// Never returns an error: a validation failure is reported as an
    /// aborted `BatchResult` with no case results, mirroring what the
    /// editor UI expects.
    #[instrument(
        skip(self, request),
        fields(
            run_id = %request.id,
            language = %request.language,
            test_count = request.test_cases.len(),
        )
    )]
    pub async fn run(&self, request: &RunRequest) -> BatchResult {
        if let Err(e) = validator::validate(&request.source_code, request.language) {
            warn!(error = %e, "Validation failed; no cases executed");
            return BatchResult::aborted(e.to_string());
        }

        // Source is fixed for the whole run, so the entry point is
        // resolved once and reused. Only the native path needs one.
        // Resolution failure is recorded on every case rather than
        // aborting the batch: each case fails deterministically with
        // the same NoEntryPoint error.
        let entry = if request.language.has_native_backend() {
            match resolver::resolve(&request.source_code) {
                Ok(entry) => {
                    debug!(entry = %entry.name, arity = entry.arity, "Resolved entry point");
                    Some(entry)
                }
                Err(e) => {
                    warn!(error = %e, "No entry point resolved; every case will fail");
                    None
                }
            }
        } else {
            None
        };

        let mut results = Vec::with_capacity(request.test_cases.len());
        for (index, case) in request.test_cases.iter().enumerate() {
            let result = self.run_case(request, entry.as_ref(), index, case).await;
            debug!(
                index,
                passed = result.passed,
                execution_time_ms = result.execution_time_ms,
                error = result.error.as_deref().unwrap_or(""),
                "Case settled"
            );
            results.push(result);
        }

        let batch = evaluator::aggregate(results, request.test_cases.len());
        info!(
            passed = batch.passed_tests,
            total = batch.total_tests,
            "Run complete"
        );
        batch
    }

    async fn run_case(
        &self,
        request: &RunRequest,
        entry: Option<&EntryPoint>,
        index: usize,
        case: &TestCase,
    ) -> CaseResult {
        let input = adapter::decode_value(&case.input);
        let expected = adapter::decode_value(&case.expected);

        let start = Instant::now();
        let outcome = self.execute(request, entry, case, &expected).await;
        let execution_time_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(ExecutionOutcome { value, logs }) => {
                let passed = values_match(&value, &expected);
                CaseResult {
                    index,
                    passed,
                    actual: value,
                    expected,
                    input,
                    execution_time_ms,
                    logs,
                    error: None,
                }
            }
            Err(e) => CaseResult {
                index,
                passed: false,
                actual: Value::Null,
                expected,
                input,
                execution_time_ms,
                logs: String::new(),
                error: Some(e.to_string()),
            },
        }
    }

    async fn execute(
        &self,
        request: &RunRequest,
        entry: Option<&EntryPoint>,
        case: &TestCase,
        expected: &Value,
    ) -> Result<ExecutionOutcome, HarnessError> {
        if request.language.has_native_backend() {
            let entry = entry.ok_or(HarnessError::NoEntryPoint)?;
            let args = adapter::adapt(&case.input, entry);
            self.engine
                .execute_native(&request.source_code, entry, &args)
                .await
        } else {
            self.engine
                .simulate(&request.source_code, request.language, &case.input, expected)
                .await
        }
    }
}
