use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declared language of a submission.
///
/// Only JavaScript/TypeScript have a real execution backend; every other
/// language is graded by structural simulation (see `arbiter-harness`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    CSharp,
    Go,
    Rust,
}

impl Language {
    /// True when submissions in this language are genuinely executed
    /// rather than structurally simulated.
    pub fn has_native_backend(&self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" | "c++" => Ok(Language::Cpp),
            "csharp" | "c#" => Ok(Language::CSharp),
            "go" => Ok(Language::Go),
            "rust" => Ok(Language::Rust),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// One (input, expected-output) pair from a question record.
///
/// Either field may hold a raw JSON value or a string carrying a
/// JSON-encoded value; the harness decodes strings before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: Value,
    pub expected: Value,
}

/// A complete grading request: one submission against one test-case batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub id: Uuid,
    pub language: Language,
    pub source_code: String,
    pub test_cases: Vec<TestCase>,
}

impl RunRequest {
    pub fn new(language: Language, source_code: impl Into<String>, test_cases: Vec<TestCase>) -> Self {
        Self {
            id: Uuid::new_v4(),
            language,
            source_code: source_code.into(),
            test_cases,
        }
    }
}

/// Verdict for a single test case. Index matches the input order of the
/// batch; consumers address cases by `results[i].index == i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub index: usize,
    pub passed: bool,
    pub actual: Value,
    pub expected: Value,
    pub input: Value,
    pub execution_time_ms: u64,
    /// Captured console/log output from the execution.
    pub logs: String,
    pub error: Option<String>,
}

/// Aggregated outcome of one run.
///
/// `success: false` with empty `results` means the run aborted before any
/// case executed (validation failure). Otherwise `results` holds exactly
/// one entry per submitted test case, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<CaseResult>,
    pub total_tests: usize,
    pub passed_tests: usize,
}

impl BatchResult {
    /// Batch that failed before any case executed.
    pub fn aborted(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            results: Vec::new(),
            total_tests: 0,
            passed_tests: 0,
        }
    }
}
