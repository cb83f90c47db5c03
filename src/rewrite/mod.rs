//! Load-path rewriting for macOS .app bundle packaging.
//!
//! The target binary ships inside a helper bundle three directory levels below
//! the companion `<branding>Tool.app`, whose `Contents/Frameworks` directory
//! collects every framework the binary depends on. Each of the four known
//! dependencies is rewritten in a fixed sequence, aborting on the first
//! failure.

use std::path::Path;
use std::process::Command;

use crate::cli::Options;
use crate::error::{Result, RewriterError};

const INSTALL_NAME_TOOL: &str = "install_name_tool";

/// Where a dependency's load-path reference points before patching.
///
/// Qt frameworks are referenced by their absolute developer-tree path under
/// `<qtdir>/lib`; the tool library and crash reporter are already bundled and
/// referenced relative to the executable. The asymmetry is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceOrigin {
    /// Absolute path under the Qt installation's lib directory
    QtLib,
    /// `@executable_path/../Frameworks` relative to the unpatched binary
    BundledFrameworks,
}

/// One framework dependency whose load-path reference must be rewritten.
#[derive(Debug)]
struct Dependency {
    name: String,
    version: &'static str,
    origin: ReferenceOrigin,
}

impl Dependency {
    /// Relative path of the dylib inside its .framework bundle,
    /// `<name>.framework/Versions/<version>/<name>`.
    fn framework_path(&self) -> String {
        framework_path(&self.name, self.version)
    }

    /// Load-path reference currently embedded in the target binary.
    fn reference_from(&self, qtdir: &Path) -> String {
        match self.origin {
            ReferenceOrigin::QtLib => {
                format!("{}/lib/{}", qtdir.display(), self.framework_path())
            }
            ReferenceOrigin::BundledFrameworks => {
                format!("@executable_path/../Frameworks/{}", self.framework_path())
            }
        }
    }

    /// Load-path reference the binary should use after installation.
    fn reference_to(&self, branding: &str) -> String {
        reference_to(branding, &self.framework_path())
    }
}

fn framework_path(name: &str, version: &str) -> String {
    format!("{name}.framework/Versions/{version}/{name}")
}

fn reference_to(branding: &str, framework: &str) -> String {
    format!("@executable_path/../../../{branding}Tool.app/Contents/Frameworks/{framework}")
}

/// The four dependencies shipped in `<branding>Tool.app/Contents/Frameworks`.
fn dependencies(branding: &str) -> [Dependency; 4] {
    [
        Dependency {
            name: "QtCore".to_string(),
            version: "4",
            origin: ReferenceOrigin::QtLib,
        },
        Dependency {
            name: "QtGui".to_string(),
            version: "4",
            origin: ReferenceOrigin::QtLib,
        },
        Dependency {
            name: format!("{branding}Tool_lib"),
            version: "A",
            origin: ReferenceOrigin::BundledFrameworks,
        },
        Dependency {
            name: "GoogleBreakpad".to_string(),
            version: "A",
            origin: ReferenceOrigin::BundledFrameworks,
        },
    ]
}

/// Rewrites all four framework references in the target binary.
///
/// Runs `install_name_tool -change <from> <to> <target>` once per dependency,
/// in order, stopping at the first failure. Repeated runs are harmless:
/// install_name_tool leaves the binary untouched when the old reference is no
/// longer present.
pub fn change_references(options: &Options) -> Result<()> {
    let tool = which::which(INSTALL_NAME_TOOL)?;

    log::info!("Rewriting load paths in {}", options.target.display());

    for dependency in dependencies(&options.branding) {
        let from = dependency.reference_from(&options.qtdir);
        let to = dependency.reference_to(&options.branding);
        change_reference(&tool, &options.target, &from, &to)?;
    }

    Ok(())
}

/// Runs install_name_tool for a single (from, to) rewrite pair.
///
/// stderr is inherited so the tool's own diagnostics reach the user on
/// failure.
fn change_reference(tool: &Path, target: &Path, from: &str, to: &str) -> Result<()> {
    log::debug!("  Rewriting: {} -> {}", from, to);

    let status = Command::new(tool)
        .arg("-change")
        .arg(from)
        .arg(to)
        .arg(target)
        .status()?;

    if !status.success() {
        return Err(RewriterError::PatchFailed {
            target: target.to_path_buf(),
            from: from.to_string(),
            to: to.to_string(),
            status,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn framework_path_follows_bundle_layout() {
        assert_eq!(
            framework_path("QtCore", "4"),
            "QtCore.framework/Versions/4/QtCore"
        );
        assert_eq!(
            framework_path("GoogleBreakpad", "A"),
            "GoogleBreakpad.framework/Versions/A/GoogleBreakpad"
        );
    }

    #[test]
    fn reference_to_points_into_tool_bundle() {
        assert_eq!(
            reference_to("Mozc", "QtCore.framework/Versions/4/QtCore"),
            "@executable_path/../../../MozcTool.app/Contents/Frameworks/QtCore.framework/Versions/4/QtCore"
        );
    }

    #[test]
    fn qt_dependencies_are_referenced_from_the_qt_tree() {
        let qtdir = PathBuf::from("/opt/qt");
        let deps = dependencies("Mozc");

        assert_eq!(
            deps[0].reference_from(&qtdir),
            "/opt/qt/lib/QtCore.framework/Versions/4/QtCore"
        );
        assert_eq!(
            deps[1].reference_from(&qtdir),
            "/opt/qt/lib/QtGui.framework/Versions/4/QtGui"
        );
    }

    #[test]
    fn bundled_dependencies_are_referenced_from_the_executable() {
        let qtdir = PathBuf::from("/opt/qt");
        let deps = dependencies("Mozc");

        assert_eq!(
            deps[2].reference_from(&qtdir),
            "@executable_path/../Frameworks/MozcTool_lib.framework/Versions/A/MozcTool_lib"
        );
        assert_eq!(
            deps[3].reference_from(&qtdir),
            "@executable_path/../Frameworks/GoogleBreakpad.framework/Versions/A/GoogleBreakpad"
        );
    }

    #[test]
    fn new_references_collect_into_tool_frameworks() {
        let deps = dependencies("Mozc");

        assert_eq!(
            deps[0].reference_to("Mozc"),
            "@executable_path/../../../MozcTool.app/Contents/Frameworks/QtCore.framework/Versions/4/QtCore"
        );
        assert_eq!(
            deps[2].reference_to("Mozc"),
            "@executable_path/../../../MozcTool.app/Contents/Frameworks/MozcTool_lib.framework/Versions/A/MozcTool_lib"
        );
    }
}
