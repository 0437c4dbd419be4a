//! Compile database records and serialization.

use crate::error::{ErrorExt, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, ser::PrettyFormatter};
use std::path::Path;

/// One `compile_commands.json` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    /// Working directory of the compilation
    pub directory: String,
    /// Full command line
    pub command: String,
    /// Source file, relative to `directory`
    pub file: String,
}

/// Serializes entries as a JSON array indented with four spaces.
pub fn to_pretty_json(entries: &[Value]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the database to `path` through a sibling temporary file, so readers
/// never observe a partially written database.
pub async fn write_database(path: &Path, entries: &[Value]) -> Result<()> {
    let json = to_pretty_json(entries)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, json)
        .await
        .fs_context("failed to write", &tmp_path)?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e).fs_context("failed to move compile database into place at", path);
    }

    Ok(())
}
