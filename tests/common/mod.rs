//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

#[cfg(unix)]
/// Writes an executable shell script named `name` into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod script");
    path
}

#[cfg(unix)]
/// A fake tool that appends its arguments, one invocation per line, to `log`.
pub fn recording_tool(dir: &Path, name: &str, log: &Path) -> PathBuf {
    write_script(dir, name, &format!("echo \"$*\" >> '{}'\n", log.display()))
}

#[cfg(unix)]
/// A fake tool that prints `stderr` and exits with `code`.
pub fn failing_tool(dir: &Path, name: &str, stderr: &str, code: i32) -> PathBuf {
    write_script(dir, name, &format!("echo '{stderr}' >&2\nexit {code}\n"))
}

/// Lines recorded by a [`recording_tool`], empty if it never ran.
pub fn recorded(log: &Path) -> Vec<String> {
    std::fs::read_to_string(log)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Path of the `objcpp` binary under test.
pub fn objcpp_bin() -> &'static str {
    env!("CARGO_BIN_EXE_objcpp")
}

/// Path of the `generate_compiler_commands` binary under test.
pub fn generate_bin() -> &'static str {
    env!("CARGO_BIN_EXE_generate_compiler_commands")
}
