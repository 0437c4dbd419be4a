//! External tool resolution and invocation.
//!
//! Every subprocess this crate starts goes through [`Tool`]: the program is
//! resolved with `which` up front (so a missing binary is a configuration
//! problem, not an opaque spawn failure), then run to completion with its
//! output captured.

use crate::error::{Result, ToolError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Output;

/// A resolved external program.
#[derive(Debug, Clone)]
pub struct Tool {
    name: String,
    program: PathBuf,
}

impl Tool {
    /// Resolves `program` on PATH (or as a path relative to the current directory).
    pub fn resolve(program: impl AsRef<OsStr>) -> Result<Self> {
        Self::resolve_in(program, None)
    }

    /// Resolves `program` on PATH, treating relative paths as relative to `cwd`.
    pub fn resolve_in(program: impl AsRef<OsStr>, cwd: Option<&Path>) -> Result<Self> {
        let program = program.as_ref();
        let name = program.to_string_lossy().into_owned();

        let resolved = match cwd {
            Some(dir) => which::which_in(program, std::env::var_os("PATH"), dir),
            None => which::which(program),
        };

        match resolved {
            Ok(path) => {
                log::debug!("Found {} at: {}", name, path.display());
                Ok(Self {
                    name,
                    program: path,
                })
            }
            Err(e) => Err(ToolError::configuration(format!(
                "{} not found: {}",
                name, e
            ))),
        }
    }

    /// Name the tool was requested by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the tool with `args`, capturing stdout and stderr.
    ///
    /// A non-zero exit status becomes [`ToolError::ExternalTool`] carrying the
    /// captured stderr.
    pub async fn run<I, S>(&self, args: I, cwd: Option<&Path>) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command_line = display_command(&self.name, &args);
        log::debug!("Running: {}", command_line);

        let mut command = tokio::process::Command::new(&self.program);
        command.args(&args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|e| {
            ToolError::configuration(format!("failed to execute {}: {}", self.name, e))
        })?;

        if !output.status.success() {
            return Err(ToolError::ExternalTool {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output)
    }
}

/// Joins a program and its arguments with single spaces.
pub fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_joins_with_single_spaces() {
        assert_eq!(
            display_command("/usr/bin/clang", &["-c", "a.mm", "-o", "a.o"]),
            "/usr/bin/clang -c a.mm -o a.o"
        );
        assert_eq!(display_command::<&str>("/usr/bin/clang", &[]), "/usr/bin/clang");
    }

    #[test]
    fn missing_tool_is_a_configuration_error() {
        let err = Tool::resolve("objcpp-tools-no-such-binary").unwrap_err();
        assert!(matches!(err, ToolError::Configuration { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_tool_reports_stderr() {
        let sh = Tool::resolve("sh").expect("sh on PATH");
        let err = sh
            .run(["-c", "echo boom >&2; exit 3"], None)
            .await
            .unwrap_err();
        assert_eq!(err.captured_stderr(), Some("boom\n"));
        match err {
            ToolError::ExternalTool { status, .. } => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_tool_returns_stdout() {
        let sh = Tool::resolve("sh").expect("sh on PATH");
        let output = sh.run(["-c", "printf hello"], None).await.unwrap();
        assert_eq!(output.stdout, b"hello");
    }
}
