//! Command line interface for the reference rewriter.

mod args;

pub use args::{Args, Options};

use crate::error::Result;
use crate::rewrite;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    let options = args.validate()?;
    rewrite::change_references(&options)?;
    Ok(0)
}
