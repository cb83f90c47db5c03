//! Error types for reference rewriting operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rewriter operations
pub type Result<T> = std::result::Result<T, RewriterError>;

/// Main error type for all rewriter operations
#[derive(Error, Debug)]
pub enum RewriterError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// install_name_tool is not available on PATH
    #[error("install_name_tool not found on PATH: {0}")]
    ToolNotFound(#[from] which::Error),

    /// install_name_tool exited with a failure status
    #[error("install_name_tool failed for {target}: {from} -> {to} ({status})", target = .target.display())]
    PatchFailed {
        /// Binary being patched
        target: PathBuf,
        /// Load-path reference being replaced
        from: String,
        /// Replacement load-path reference
        to: String,
        /// Exit status reported by install_name_tool
        status: std::process::ExitStatus,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}
