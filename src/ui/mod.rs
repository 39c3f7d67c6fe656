//! User interface module.
//!
//! Everything printed for a human (as opposed to rendered documents) goes
//! through [`formatter`].

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command, display_command_output, display_error,
    display_run_report, display_scenario_passed, display_scenario_start,
    display_success,
};
