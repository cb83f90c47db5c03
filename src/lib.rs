//! macOS dylib load-path reference rewriter
//!
//! Build-time packaging helper that patches a compiled binary's dynamic-library
//! load commands so its Qt frameworks, companion tool library, and crash
//! reporter resolve from the installed `<branding>Tool.app` bundle rather than
//! the developer build tree.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod rewrite;

// Re-export commonly used types
pub use error::{CliError, Result, RewriterError};
