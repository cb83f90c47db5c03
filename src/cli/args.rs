//! Command line argument parsing and validation.

use clap::Parser;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Rewrites framework load-path references in a macOS binary
#[derive(Parser, Debug)]
#[command(
    name = "change_reference_mac",
    version,
    about = "Rewrites framework load-path references in a macOS binary",
    long_about = "Patches the dylib load commands of a compiled binary so that its Qt
frameworks, companion tool library, and crash reporter resolve from the
installed <branding>Tool.app bundle instead of the developer build tree.

Usage:
  change_reference_mac --qtdir=/path/to/qtdir \\
      --target=/path/to/target.app/Contents/MacOS/target --branding=Mozc

Exit code 0 = all four load-path references were rewritten."
)]
pub struct Args {
    /// Root of the Qt installation containing lib/QtCore.framework and lib/QtGui.framework
    #[arg(long, value_name = "PATH")]
    pub qtdir: Option<PathBuf>,

    /// Compiled binary to patch in place
    #[arg(long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Product brand prefix naming the companion tool bundle and its library framework
    #[arg(long, value_name = "STRING")]
    pub branding: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments and resolve paths to absolute form.
    ///
    /// Every flag is optional at the parse layer but mandatory here: an absent
    /// or empty value is reported by name before any patching is attempted.
    pub fn validate(&self) -> Result<Options> {
        let qtdir = require_path(self.qtdir.as_deref(), "--qtdir")?;
        let target = require_path(self.target.as_deref(), "--target")?;
        let branding = match self.branding.as_deref() {
            Some(branding) if !branding.is_empty() => branding.to_string(),
            _ => {
                return Err(CliError::MissingArgument {
                    argument: "--branding".to_string(),
                }
                .into());
            }
        };

        Ok(Options {
            qtdir: qtdir.absolutize()?.into_owned(),
            target: target.absolutize()?.into_owned(),
            branding,
        })
    }
}

fn require_path<'a>(
    value: Option<&'a Path>,
    argument: &str,
) -> std::result::Result<&'a Path, CliError> {
    match value {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(CliError::MissingArgument {
            argument: argument.to_string(),
        }),
    }
}

/// Validated configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct Options {
    /// Absolute path to the Qt installation root
    pub qtdir: PathBuf,

    /// Absolute path to the binary to patch
    pub target: PathBuf,

    /// Brand prefix, e.g. "Mozc" for MozcTool.app
    pub branding: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(qtdir: Option<&str>, target: Option<&str>, branding: Option<&str>) -> Args {
        Args {
            qtdir: qtdir.map(PathBuf::from),
            target: target.map(PathBuf::from),
            branding: branding.map(String::from),
        }
    }

    #[test]
    fn validate_accepts_complete_options() {
        let options = args(Some("/opt/qt"), Some("/build/out/Tool"), Some("Mozc"))
            .validate()
            .unwrap();
        assert_eq!(options.qtdir, PathBuf::from("/opt/qt"));
        assert_eq!(options.target, PathBuf::from("/build/out/Tool"));
        assert_eq!(options.branding, "Mozc");
    }

    #[test]
    fn validate_resolves_relative_paths() {
        let options = args(Some("qt"), Some("out/Tool"), Some("Mozc"))
            .validate()
            .unwrap();
        assert!(options.qtdir.is_absolute());
        assert!(options.target.is_absolute());
    }

    #[test]
    fn validate_names_the_missing_flag() {
        for (args, flag) in [
            (args(None, Some("/t"), Some("Mozc")), "--qtdir"),
            (args(Some("/qt"), None, Some("Mozc")), "--target"),
            (args(Some("/qt"), Some("/t"), None), "--branding"),
            (args(Some("/qt"), Some("/t"), Some("")), "--branding"),
        ] {
            let err = args.validate().unwrap_err();
            assert!(err.to_string().contains(flag), "expected {flag} in {err}");
        }
    }
}
