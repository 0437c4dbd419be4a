//! Header selection, umbrella header synthesis and header installation.

use super::layout::FrameworkLayout;
use crate::error::{Result, ToolError};
use crate::utils::fs;
use std::path::{Component, Path, PathBuf};

/// Guard that keeps the umbrella header out of plain C/C++ translation units.
pub const UMBRELLA_PREAMBLE: &str = "\
#ifndef __OBJC__
#error \"This file MUST be included in ObjC compilation context only!\"
#endif

";

/// Returns the inputs that are headers, sorted lexicographically.
///
/// Header paths are installed below `Headers/` under the same relative path,
/// so absolute paths and paths with `..` components are rejected.
pub fn select_headers<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<String>> {
    let mut headers = Vec::new();
    for input in inputs.iter().map(|input| input.as_ref()) {
        if !input.ends_with(".h") {
            continue;
        }
        check_relative(input)?;
        headers.push(input.to_string());
    }
    headers.sort();
    Ok(headers)
}

fn check_relative(header: &str) -> Result<()> {
    let nested = Path::new(header)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if nested {
        Ok(())
    } else {
        Err(ToolError::configuration(format!(
            "header {} must be relative to the source root and stay inside it",
            header
        )))
    }
}

/// Renders the umbrella header importing every header through the framework's namespace.
///
/// `headers` is expected to be sorted already (see [`select_headers`]).
pub fn umbrella_header(module_name: &str, headers: &[String]) -> String {
    let mut contents = String::from(UMBRELLA_PREAMBLE);
    for header in headers {
        contents.push_str(&format!("#import <{}/{}>\n", module_name, header));
    }
    contents
}

/// Writes the umbrella header and copies each header from `source_root` into `Headers/`.
///
/// Returns the path of the umbrella header.
pub async fn install_headers(
    layout: &FrameworkLayout,
    source_root: &Path,
    headers: &[String],
) -> Result<PathBuf> {
    let headers_dir = layout.headers_dir();

    let umbrella_path = headers_dir.join(layout.umbrella_header_name());
    log::info!(
        "Writing umbrella header {} ({} imports)",
        umbrella_path.display(),
        headers.len()
    );
    fs::write_file(
        &umbrella_path,
        &umbrella_header(layout.module_name(), headers),
    )
    .await?;

    for header in headers {
        let src = source_root.join(header);
        let dst = headers_dir.join(header);
        log::debug!("  {} -> {}", src.display(), dst.display());
        fs::copy_file_with_metadata(&src, &dst).await?;
    }

    Ok(umbrella_path)
}
