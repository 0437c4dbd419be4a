//! Build graph introspection through ninja's `-t` tools.

use crate::error::{Result, ToolError};
use crate::toolchain::Tool;
use serde_json::Value;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Rules whose commands `-t compdb` exports.
pub const COMPDB_RULES: [&str; 4] = ["cc", "cxx", "objc", "objcxx"];

/// A ninja binary bound to one build directory.
#[derive(Debug, Clone)]
pub struct Ninja {
    tool: Tool,
    build_dir: PathBuf,
}

impl Ninja {
    /// Binds `tool` to `build_dir`. Commands run with `build_dir` as working directory.
    pub fn new(tool: Tool, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            build_dir: build_dir.into(),
        }
    }

    async fn run_tool(&self, tool_args: &[&str]) -> Result<String> {
        let mut args = vec![OsStr::new("-C"), self.build_dir.as_os_str()];
        args.extend(tool_args.iter().map(OsStr::new));

        let output = self.tool.run(&args, Some(self.build_dir.as_path())).await?;
        String::from_utf8(output.stdout).map_err(|e| ToolError::UnexpectedBuildGraph {
            reason: format!("{} produced non UTF-8 output: {}", self.tool.name(), e),
        })
    }

    /// Native compile database for C, C++, Objective-C and Objective-C++ rules.
    pub async fn compdb(&self) -> Result<Vec<Value>> {
        let mut args = vec!["-t", "compdb"];
        args.extend(COMPDB_RULES);
        let stdout = self.run_tool(&args).await?;
        Ok(serde_json::from_str(&stdout)?)
    }

    /// Command listing, one command per line, optionally limited to what `target` needs.
    pub async fn commands(&self, target: Option<&str>) -> Result<String> {
        let mut args = vec!["-t", "commands"];
        args.extend(target);
        self.run_tool(&args).await
    }
}
