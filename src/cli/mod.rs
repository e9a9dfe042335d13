// CLI module for riffy
//
// Argument parsing, output rendering and the command implementations.
// Only the binary compiles this module.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

use thiserror::Error;

/// Argument-level failures that are not library errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("no files specified")]
    NoFiles,
    #[error("invalid glob pattern: {0}")]
    InvalidPattern(String),
    #[error("{failed} of {total} files failed to parse")]
    BatchFailures { failed: usize, total: usize },
}
