// Harness configuration for the Arbiter grader
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fixed wall-clock bound per test case. Matches the editor's contract:
/// a case either settles or is reported as timed out within 5 seconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Synthetic delay applied on the simulated execution path so that faked
/// verdicts report a plausible non-zero execution time.
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 120;

/// Tunable harness settings, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Per-case execution bound in milliseconds.
    pub timeout_ms: u64,
    /// Binary used for the native JavaScript/TypeScript path.
    pub node_command: String,
    /// Synthetic delay for simulated languages, in milliseconds.
    pub simulated_delay_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            node_command: "node".to_string(),
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
        }
    }
}

impl HarnessConfig {
    /// Load settings from a JSON file; missing fields fall back to defaults.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
