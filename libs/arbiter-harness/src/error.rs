use thiserror::Error;

/// Failure taxonomy for one grading run.
///
/// Only `Validation` is fatal to a whole batch; everything else is caught
/// at case granularity and recorded on that case's result.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Pre-execution rejection of the submitted source. Aborts the run
    /// before any case executes.
    #[error("{0}")]
    Validation(String),

    /// No invocable symbol could be located in the source.
    #[error("No executable function found. Please define a function.")]
    NoEntryPoint,

    /// The case exceeded the wall-clock execution bound.
    #[error("Execution timeout ({} seconds)", .0 / 1000)]
    Timeout(u64),

    /// Any runtime failure during invocation, already reworded into a
    /// user-facing message where a known pattern was recognized.
    #[error("{0}")]
    Execution(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Reword low-level runtime messages into actionable guidance, the
    /// same two patterns the editor UI special-cases.
    pub fn from_runtime_message(message: &str) -> Self {
        let reworded = if message.contains("is not defined") {
            "Function not found. Make sure to define a function named \
             \"solution\", \"main\", or any function name."
        } else if message.contains("Cannot read propert") {
            "Error accessing input data. Check your function parameters."
        } else {
            message
        };
        HarnessError::Execution(format!("Execution error: {}", reworded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_identifier_gets_guidance() {
        let err = HarnessError::from_runtime_message("solve is not defined");
        assert!(err.to_string().contains("Function not found"));
    }

    #[test]
    fn property_access_gets_guidance() {
        let err = HarnessError::from_runtime_message(
            "Cannot read properties of undefined (reading 'length')",
        );
        assert!(err.to_string().contains("Check your function parameters"));
    }

    #[test]
    fn other_messages_pass_through() {
        let err = HarnessError::from_runtime_message("Unexpected token ')'");
        assert_eq!(err.to_string(), "Execution error: Unexpected token ')'");
    }

    #[test]
    fn timeout_reports_seconds() {
        assert_eq!(
            HarnessError::Timeout(5000).to_string(),
            "Execution timeout (5 seconds)"
        );
    }
}
