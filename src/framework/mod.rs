//! Framework bundle assembly.
//!
//! Produces a versioned `<Name>.framework` from a linked dynamic library and
//! the public headers listed in a response file:
//!
//! 1. Read the response file and keep the `.h` inputs, sorted
//! 2. Recreate the bundle skeleton ([`layout`])
//! 3. Write the umbrella header and copy headers ([`headers`])
//! 4. Write the module map ([`modulemap`])
//! 5. Install, rename and optionally sign the library ([`dylib`])
//!
//! The bundle is rebuilt from scratch on every run.

pub mod dylib;
pub mod headers;
pub mod layout;
pub mod modulemap;
pub mod response_file;

pub use dylib::MachOTools;
pub use layout::FrameworkLayout;

use crate::error::Result;
use std::path::PathBuf;

/// Inputs for one framework assembly.
#[derive(Debug, Clone)]
pub struct FrameworkSettings {
    /// Bundle directory name, e.g. `Foo.framework`
    pub framework_name: String,
    /// Linked dynamic library to install as the framework binary
    pub framework_dylib: PathBuf,
    /// Directory the header paths in the response file are relative to
    pub source_root: PathBuf,
    /// Directory the bundle is created in
    pub out_dir: PathBuf,
    /// Response file listing the framework inputs
    pub input_files: PathBuf,
    /// Code signing identity; signing is skipped when absent
    pub signing_key: Option<String>,
}

/// Assembles the framework described by `settings` and returns its layout.
pub async fn build(settings: &FrameworkSettings, tools: &MachOTools) -> Result<FrameworkLayout> {
    let inputs = response_file::read_inputs(&settings.input_files).await?;
    let header_files = headers::select_headers(&inputs)?;
    log::debug!(
        "{} inputs, {} headers from {}",
        inputs.len(),
        header_files.len(),
        settings.input_files.display()
    );

    let layout = FrameworkLayout::new(&settings.out_dir, &settings.framework_name)?;
    layout.create().await?;

    headers::install_headers(&layout, &settings.source_root, &header_files).await?;
    modulemap::install_module_map(&layout).await?;
    dylib::install_dylib(
        &layout,
        &settings.framework_dylib,
        settings.signing_key.as_deref(),
        tools,
    )
    .await?;

    log::info!("✓ Built {}", layout.root().display());
    Ok(layout)
}
