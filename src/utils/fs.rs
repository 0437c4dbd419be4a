//! File system utilities for bundle assembly.
//!
//! Provides directory recreation, idempotent symlink creation and
//! metadata-preserving copies with path-aware error context.

use crate::error::{ErrorExt, Result, ToolError};
use std::{
    fs::FileTimes,
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("failed to create directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("failed to remove directory", path),
    }
}

/// Returns true if `path` itself is a symlink (dangling or not).
pub async fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .await
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Creates a directory symlink at `link` pointing to `target`, unless a symlink already exists there.
///
/// Returns whether a new link was created.
pub async fn symlink_dir_if_absent(target: &Path, link: &Path) -> Result<bool> {
    if is_symlink(link).await {
        log::debug!("Symlink already present: {}", link.display());
        return Ok(false);
    }
    symlink_dir(target, link)
        .await
        .fs_context("failed to create symlink", link)?;
    Ok(true)
}

/// Creates a file symlink at `link` pointing to `target`, unless a symlink already exists there.
///
/// Returns whether a new link was created.
pub async fn symlink_file_if_absent(target: &Path, link: &Path) -> Result<bool> {
    if is_symlink(link).await {
        log::debug!("Symlink already present: {}", link.display());
        return Ok(false);
    }
    symlink_file(target, link)
        .await
        .fs_context("failed to create symlink", link)?;
    Ok(true)
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    fs::symlink(target, link).await
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    fs::symlink_dir(target, link).await
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
async fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    fs::symlink(target, link).await
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
async fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    fs::symlink_file(target, link).await
}

/// Copies a regular file, creating parent directories of the destination as needed.
///
/// Permissions are copied along with the content, and the destination receives
/// the source's access and modification times.
///
/// Fails if the source path is a directory or doesn't exist, or if both paths
/// name the same file.
pub async fn copy_file_with_metadata(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from)
        .await
        .fs_context("failed to read metadata of", from)?;
    if !metadata.is_file() {
        return Err(ToolError::configuration(format!(
            "{} is not a file",
            from.display()
        )));
    }

    if is_same_file(from, to).await {
        return Err(ToolError::configuration(format!(
            "{} and {} are the same file",
            from.display(),
            to.display()
        )));
    }

    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("failed to create directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("failed to copy", from)?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    let dest: PathBuf = to.to_path_buf();
    tokio::task::spawn_blocking(move || {
        std::fs::File::open(&dest)
            .and_then(|file| file.set_times(times))
            .fs_context("failed to set file times on", &dest)
    })
    .await
    .map_err(|e| ToolError::configuration(format!("file copy task panicked: {}", e)))?
}

async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Writes `contents` to `path`, replacing any existing file.
pub async fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .await
        .fs_context("failed to write", path)
}
