//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, warnings and errors to stderr. Rendered
//! documents are not printed here; see [`crate::output`].

use console::style;

use crate::boundary::BoundaryWarning;
use crate::scenario::RunReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

pub fn display_scenario_start(name: &str) {
    println!("{} {}", style("Running").cyan().bold(), name);
}

pub fn display_scenario_passed(name: &str) {
    println!("{} {}", style("✓").green(), style(name).green());
}

/// Print a resolved command (verbose mode)
pub fn display_command(command: &str) {
    println!("  {} {}", style("$").dim(), style(command).cyan());
}

/// Print raw command output (verbose mode). Empty streams are skipped.
pub fn display_command_output(stdout: &str, stderr: &str) {
    for line in stdout.lines() {
        println!("    {}", line);
    }
    for line in stderr.lines() {
        eprintln!("    {}", style(line).red());
    }
}

/// Summarise a completed run.
pub fn display_run_report(report: &RunReport) {
    println!(
        "\n{} {} of {} scenario(s) passed, {} command(s) executed",
        style("Summary:").bold(),
        report.passed(),
        report.outcomes.len(),
        report.total_commands()
    );
    for outcome in &report.outcomes {
        println!("  - {} [{}]", outcome.name, outcome.state);
    }
}
