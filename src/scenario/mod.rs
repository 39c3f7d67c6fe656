//! Declarative test scenarios
//!
//! A scenario document lists named tests; each test is a sequence of shell
//! commands (with `{$$name}` placeholders) and `SET context` directives,
//! followed by checks on exit codes, stderr and aggregated stdout.

pub mod document;
pub mod executor;
pub mod runner;

pub use document::{Operation, ScenarioDocument, TestScenario, SET_DIRECTIVE};
pub use executor::{CommandExecutor, CommandOutput, ScriptedExecutor, ShellExecutor};
pub use runner::{RunReport, ScenarioOutcome, ScenarioRunner, ScenarioState};
