//! Dynamic library installation into the framework bundle.
//!
//! Copies the linked library into `Versions/Current`, rewrites its install
//! name to a run-path-relative self reference with `install_name_tool`, and
//! re-signs it with `codesign` when an identity is configured.

use super::layout::FrameworkLayout;
use crate::error::{Result, ToolError};
use crate::toolchain::Tool;
use crate::utils::fs;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Platform tools used to finalize the installed library.
#[derive(Debug, Clone)]
pub struct MachOTools {
    install_name_tool: Tool,
    codesign: Option<Tool>,
}

impl MachOTools {
    /// Resolves `install_name_tool`, and `codesign` only when signing is requested.
    pub fn resolve(
        install_name_tool: impl AsRef<OsStr>,
        codesign: impl AsRef<OsStr>,
        signing: bool,
    ) -> Result<Self> {
        let install_name_tool = Tool::resolve(install_name_tool)?;
        let codesign = if signing {
            Some(Tool::resolve(codesign)?)
        } else {
            None
        };

        Ok(Self {
            install_name_tool,
            codesign,
        })
    }
}

/// Installs `dylib` as the framework binary and returns the installed path.
///
/// # Steps
/// 1. Copy to `Versions/Current/<Name>` preserving timestamps
/// 2. Link `<Name>` at the bundle root
/// 3. `install_name_tool -id @rpath/<Name>.framework/<Name>`
/// 4. `install_name_tool -change @rpath/<dylib file name> @rpath/<bundle>/<Name>`
/// 5. `codesign --force -s <identity>` if `signing_key` is set
pub async fn install_dylib(
    layout: &FrameworkLayout,
    dylib: &Path,
    signing_key: Option<&str>,
    tools: &MachOTools,
) -> Result<PathBuf> {
    let dest = layout.binary_path();
    log::info!("Installing {} as {}", dylib.display(), dest.display());

    fs::copy_file_with_metadata(dylib, &dest).await?;
    layout.link_binary().await?;

    let install_name = layout.install_name();
    tools
        .install_name_tool
        .run(
            [OsStr::new("-id"), OsStr::new(&install_name), dest.as_os_str()],
            None,
        )
        .await?;

    let dylib_name = dylib.file_name().ok_or_else(|| {
        ToolError::configuration(format!("invalid dylib path: {}", dylib.display()))
    })?;
    let old_reference = format!("@rpath/{}", dylib_name.to_string_lossy());
    let new_reference = format!(
        "@rpath/{}/{}",
        layout.root().display(),
        layout.module_name()
    );
    log::debug!("Rewriting: {} -> {}", old_reference, new_reference);
    tools
        .install_name_tool
        .run(
            [
                OsStr::new("-change"),
                OsStr::new(&old_reference),
                OsStr::new(&new_reference),
                dest.as_os_str(),
            ],
            None,
        )
        .await?;

    match (signing_key, &tools.codesign) {
        (Some(identity), Some(codesign)) => {
            log::info!("Signing {} with identity {}", dest.display(), identity);
            codesign
                .run(
                    [
                        OsStr::new("--force"),
                        OsStr::new("-s"),
                        OsStr::new(identity),
                        dest.as_os_str(),
                    ],
                    None,
                )
                .await?;
        }
        (Some(_), None) => {
            return Err(ToolError::configuration(
                "signing identity given but codesign was not resolved",
            ));
        }
        (None, _) => log::debug!("No signing identity, skipping codesign"),
    }

    Ok(dest)
}
