//! Recognizing compiler shim invocations in a ninja command listing.

use crate::error::{Result, ToolError};
use std::path::Path;

/// File stem of the shim binary (matches `objcpp` and `objcpp.py`).
pub const SHIM_NAME: &str = "objcpp";

/// Flag that makes the shim print its resolved command.
pub const DRY_RUN_FLAG: &str = "--dry-run";

/// Suffix identifying the Objective-C++ source of a shim compile.
pub const OBJCPP_SOURCE_SUFFIX: &str = ".mm";

/// A build step that runs `objcpp compile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimCompile {
    tokens: Vec<String>,
    subcommand: usize,
}

impl ShimCompile {
    /// Parses one command line, returning `None` if it is not a shim compile.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || !line.contains(SHIM_NAME) {
            return Ok(None);
        }

        let tokens = shlex::split(line).ok_or_else(|| ToolError::UnexpectedBuildGraph {
            reason: format!("cannot tokenize command: {}", line),
        })?;

        let subcommand = tokens
            .windows(2)
            .position(|pair| is_shim(&pair[0]) && pair[1] == "compile")
            .map(|i| i + 1);

        Ok(subcommand.map(|subcommand| Self { tokens, subcommand }))
    }

    /// Program to run, as written in the build graph.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments of the original command with the dry-run flag placed right
    /// after `compile`, ahead of any forwarded compiler arguments.
    pub fn dry_run_args(&self) -> Vec<String> {
        let mut args = self.tokens[1..].to_vec();
        args.insert(self.subcommand, DRY_RUN_FLAG.to_string());
        args
    }

    /// The `.mm` source this step compiles.
    pub fn source_file(&self) -> Result<&str> {
        self.tokens
            .iter()
            .find(|token| token.ends_with(OBJCPP_SOURCE_SUFFIX))
            .map(String::as_str)
            .ok_or_else(|| ToolError::UnexpectedBuildGraph {
                reason: format!(
                    "shim compile without a {} source: {}",
                    OBJCPP_SOURCE_SUFFIX,
                    self.tokens.join(" ")
                ),
            })
    }
}

fn is_shim(token: &str) -> bool {
    Path::new(token)
        .file_stem()
        .is_some_and(|stem| stem == SHIM_NAME)
}
