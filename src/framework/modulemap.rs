//! Clang module map for the framework.

use super::layout::FrameworkLayout;
use crate::error::Result;
use crate::utils::fs;
use std::path::PathBuf;

/// File name clang looks for inside `Modules/`.
pub const MODULE_MAP_FILE: &str = "module.modulemap";

/// Renders a framework module map wired to the umbrella header.
pub fn module_map(module_name: &str, umbrella_header: &str) -> String {
    format!(
        "framework module {module_name} {{\n  \
         umbrella header \"{umbrella_header}\"\n\
         \n  \
         export *\n  \
         module * {{ export * }}\n\
         }}\n"
    )
}

/// Writes `Modules/module.modulemap` and returns its path.
pub async fn install_module_map(layout: &FrameworkLayout) -> Result<PathBuf> {
    let path = layout.modules_dir().join(MODULE_MAP_FILE);
    log::info!("Writing module map {}", path.display());
    fs::write_file(
        &path,
        &module_map(layout.module_name(), &layout.umbrella_header_name()),
    )
    .await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_map_declares_framework_module() {
        assert_eq!(
            module_map("Foo", "Foo.h"),
            "framework module Foo {\n  umbrella header \"Foo.h\"\n\n  export *\n  module * { export * }\n}\n"
        );
    }
}
