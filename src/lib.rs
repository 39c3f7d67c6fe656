pub mod boundary;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod render;
pub mod scenario;
pub mod template;
pub mod ui;

pub use error::{Result, TapprError};
