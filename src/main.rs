//! change_reference_mac - macOS dylib reference rewriter.
//!
//! This binary rewrites the load-path references embedded in a compiled binary
//! so that, after packaging, the binary finds its dependent frameworks relative
//! to the installed application layout instead of the developer build tree.

mod cli;
mod error;
mod rewrite;

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
