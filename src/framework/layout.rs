//! Versioned framework directory layout.
//!
//! ```text
//! Foo.framework/
//! ├── Foo      -> Versions/Current/Foo
//! ├── Headers  -> Versions/Current/Headers
//! ├── Modules  -> Versions/Current/Modules
//! └── Versions/
//!     ├── A/{Foo,Headers,Modules}
//!     └── Current -> A
//! ```

use crate::error::{Result, ToolError};
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// Name of the single framework version this tool produces.
pub const VERSION: &str = "A";

/// Paths inside a `<Name>.framework` bundle.
#[derive(Debug, Clone)]
pub struct FrameworkLayout {
    root: PathBuf,
    module_name: String,
}

impl FrameworkLayout {
    /// Describes the bundle `out_dir/<framework_name>`.
    ///
    /// The module name is `framework_name` up to its first `.`, so
    /// `Foo.framework` yields module `Foo`.
    pub fn new(out_dir: &Path, framework_name: &str) -> Result<Self> {
        let module_name = framework_name.split('.').next().unwrap_or_default();
        if module_name.is_empty() {
            return Err(ToolError::configuration(format!(
                "invalid framework name: {:?}",
                framework_name
            )));
        }

        Ok(Self {
            root: out_dir.join(framework_name),
            module_name: module_name.to_string(),
        })
    }

    /// The `<Name>.framework` directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Framework name without extension.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// File name of the synthesized umbrella header (`<Name>.h`).
    pub fn umbrella_header_name(&self) -> String {
        format!("{}.h", self.module_name)
    }

    /// Top-level `Headers` directory (through the symlink).
    pub fn headers_dir(&self) -> PathBuf {
        self.root.join("Headers")
    }

    /// Top-level `Modules` directory (through the symlink).
    pub fn modules_dir(&self) -> PathBuf {
        self.root.join("Modules")
    }

    /// `Versions/Current`.
    pub fn current_version_dir(&self) -> PathBuf {
        self.root.join("Versions").join("Current")
    }

    /// Installed dynamic library inside `Versions/Current`.
    pub fn binary_path(&self) -> PathBuf {
        self.current_version_dir().join(&self.module_name)
    }

    /// Install name the library is rewritten to.
    pub fn install_name(&self) -> String {
        format!(
            "@rpath/{}.framework/{}",
            self.module_name, self.module_name
        )
    }

    /// Deletes any existing bundle and creates a fresh directory skeleton.
    pub async fn create(&self) -> Result<()> {
        log::info!("Creating framework skeleton at {}", self.root.display());

        fs::create_dir_all(&self.root, true).await?;

        let version_dir = self.root.join("Versions").join(VERSION);
        fs::create_dir_all(&version_dir.join("Headers"), false).await?;
        fs::create_dir_all(&version_dir.join("Modules"), false).await?;

        fs::symlink_dir_if_absent(Path::new(VERSION), &self.current_version_dir()).await?;
        fs::symlink_dir_if_absent(Path::new("Versions/Current/Headers"), &self.headers_dir())
            .await?;
        fs::symlink_dir_if_absent(Path::new("Versions/Current/Modules"), &self.modules_dir())
            .await?;

        Ok(())
    }

    /// Links `<Name>` at the bundle root to the installed library.
    pub async fn link_binary(&self) -> Result<()> {
        let target = Path::new("Versions/Current").join(&self.module_name);
        fs::symlink_file_if_absent(&target, &self.root.join(&self.module_name)).await?;
        Ok(())
    }
}
