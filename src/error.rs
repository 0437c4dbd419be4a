//! Error types for framework assembly, the compiler shim and compile database generation.
//!
//! Every operation in this crate returns [`Result`]; binaries turn a [`ToolError`]
//! into diagnostic text on stderr and a non-zero exit status.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Main error type for all tool operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// Missing or malformed inputs (response files, paths, tools not on PATH)
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Reason for the error
        reason: String,
    },

    /// An external process exited unsuccessfully
    #[error("`{command}` failed with {status}")]
    ExternalTool {
        /// Command line that failed
        command: String,
        /// Exit status of the process
        status: ExitStatus,
        /// Captured standard error
        stderr: String,
    },

    /// The build graph produced something this tool does not understand
    #[error("Unexpected build graph: {reason}")]
    UnexpectedBuildGraph {
        /// Reason for the error
        reason: String,
    },

    /// Filesystem errors with the path being operated on
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolError {
    /// Shorthand for a [`ToolError::Configuration`] error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Standard error captured from a failed external tool, if any.
    pub fn captured_stderr(&self) -> Option<&str> {
        match self {
            Self::ExternalTool { stderr, .. } if !stderr.is_empty() => Some(stderr.as_str()),
            _ => None,
        }
    }
}

/// Attaches path context to IO results.
pub trait ErrorExt<T> {
    /// Wraps the error in [`ToolError::Fs`] with a description and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| ToolError::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
