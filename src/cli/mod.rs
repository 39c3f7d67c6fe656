//! Command workflows behind the `tappr` binary

pub mod orchestration;

pub use orchestration::{
    run_changelog, run_release, run_tests, ChangelogArgs, ReleaseArgs, TestArgs, WorkflowResult,
};
