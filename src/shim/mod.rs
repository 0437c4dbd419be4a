//! Compiler and linker shim.
//!
//! Forwards arguments to a driver binary. In dry-run mode `compile` returns the
//! resolved command line instead of running it, which is how the compile
//! database generator recovers the real command behind an Objective-C++ step.

use crate::error::Result;
use crate::toolchain::{Tool, display_command};

/// What the shim was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimMode {
    /// Compile a translation unit, optionally only reporting the command
    Compile {
        /// Report the command line instead of running it
        dry_run: bool,
    },
    /// Link
    Link,
}

/// Command line the driver would be invoked with.
pub fn resolved_command(driver: &str, args: &[String]) -> String {
    display_command(driver, args)
}

/// Runs the shim.
///
/// Returns the resolved command line in dry-run mode, `None` after a
/// successful driver run. Driver output is captured; a failing driver yields
/// [`crate::ToolError::ExternalTool`] with its stderr.
pub async fn run(mode: ShimMode, driver: &str, args: &[String]) -> Result<Option<String>> {
    if let ShimMode::Compile { dry_run: true } = mode {
        return Ok(Some(resolved_command(driver, args)));
    }

    let tool = Tool::resolve(driver)?;
    log::debug!("{:?}: {}", mode, resolved_command(driver, args));
    tool.run(args, None).await?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn dry_run_reports_driver_and_args() {
        let line = run(
            ShimMode::Compile { dry_run: true },
            "/usr/bin/clang",
            &args(&["-c", "a.mm", "-o", "a.o"]),
        )
        .await
        .unwrap();
        assert_eq!(line.as_deref(), Some("/usr/bin/clang -c a.mm -o a.o"));
    }

    #[tokio::test]
    async fn dry_run_does_not_require_the_driver_to_exist() {
        let line = run(ShimMode::Compile { dry_run: true }, "/no/such/clang", &[])
            .await
            .unwrap();
        assert_eq!(line.as_deref(), Some("/no/such/clang"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_link_is_silent() {
        let out = run(ShimMode::Link, "true", &args(&["-o", "libFoo.dylib"]))
            .await
            .unwrap();
        assert_eq!(out, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_compile_surfaces_driver_stderr() {
        let err = run(
            ShimMode::Compile { dry_run: false },
            "sh",
            &args(&["-c", "echo 'a.mm:1: error: expected ;' >&2; exit 1"]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::ExternalTool { .. }));
        assert_eq!(err.captured_stderr(), Some("a.mm:1: error: expected ;\n"));
    }
}
