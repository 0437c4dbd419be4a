//! Response file parsing.
//!
//! The build graph hands the list of framework inputs over in a response file
//! whose contents follow POSIX shell word-splitting rules.

use crate::error::{Result, ToolError};
use std::path::Path;

/// Splits response-file text into input paths.
pub fn split_inputs(contents: &str) -> Result<Vec<String>> {
    shlex::split(contents).ok_or_else(|| {
        ToolError::configuration("response file has unbalanced quotes or a trailing escape")
    })
}

/// Reads and tokenizes the response file at `path`.
pub async fn read_inputs(path: &Path) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        ToolError::configuration(format!(
            "failed to read response file {}: {}",
            path.display(),
            e
        ))
    })?;
    split_inputs(&contents).map_err(|e| match e {
        ToolError::Configuration { reason } => {
            ToolError::configuration(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_honours_quotes() {
        let inputs = split_inputs("api/a.h 'api/with space.h'\n  core/b.mm \"x/y.h\"\n").unwrap();
        assert_eq!(inputs, vec!["api/a.h", "api/with space.h", "core/b.mm", "x/y.h"]);
    }

    #[test]
    fn empty_file_has_no_inputs() {
        assert!(split_inputs("").unwrap().is_empty());
    }

    #[test]
    fn unbalanced_quote_is_a_configuration_error() {
        let err = split_inputs("api/a.h 'broken").unwrap_err();
        assert!(matches!(err, ToolError::Configuration { .. }));
    }

    #[tokio::test]
    async fn missing_response_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_inputs(&tmp.path().join("inputs.rsp")).await.unwrap_err();
        assert!(matches!(err, ToolError::Configuration { .. }));
    }
}
