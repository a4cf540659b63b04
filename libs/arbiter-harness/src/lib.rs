//! Arbiter harness - client-side test execution for a coding-practice
//! platform.
//!
//! Given submitted source text, a declared language, and a batch of
//! test cases, the harness validates the source, locates an entry point,
//! adapts each case's input to the entry point's arity, executes under a
//! wall-clock bound, and compares results structurally.
//!
//! **The only real execution backend is Node.js** (JavaScript/TypeScript
//! submissions). Every other language is graded by structural simulation:
//! plausible-looking source is credited with the expected output. That
//! asymmetry is deliberate scope-limiting, and simulated verdicts must
//! not be treated as authoritative.

pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod resolver;
pub mod runner;
pub mod validator;

#[cfg(test)]
mod runner_tests;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use runner::Harness;
