//! Compile database generation.
//!
//! Ninja's `-t compdb` cannot see through the `objcpp compile` shim, so the
//! database is assembled in two halves: ninja's native export, followed by one
//! record per shim step whose real command line is recovered by re-running
//! the step with `--dry-run`.

pub mod ninja;
pub mod record;
pub mod shim_command;

pub use ninja::Ninja;
pub use record::CompileCommand;
pub use shim_command::ShimCompile;

use crate::error::Result;
use crate::toolchain::Tool;
use crate::utils::path;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Inputs for one database generation.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Ninja build directory, relative to the current directory or absolute
    pub out_dir: PathBuf,
    /// Destination of the JSON database
    pub json: PathBuf,
    /// Restrict the shim command scan to what this target needs
    pub target: Option<String>,
    /// Ninja binary
    pub ninja: OsString,
}

/// Generates the compile database and returns the number of records written.
pub async fn generate(settings: &GenerateSettings) -> Result<usize> {
    let out_dir = path::resolve(&settings.out_dir)?;
    let json_path = path::resolve(&settings.json)?;

    let ninja = Ninja::new(Tool::resolve(&settings.ninja)?, &out_dir);

    let mut entries = ninja.compdb().await?;
    log::info!("{} native compile commands", entries.len());

    let listing = ninja.commands(settings.target.as_deref()).await?;
    let mut recovered = 0usize;
    for line in listing.lines() {
        let Some(step) = ShimCompile::parse(line)? else {
            continue;
        };
        let record = recover_command(&step, &out_dir).await?;
        log::debug!("Recovered {}", record.file);
        entries.push(serde_json::to_value(record)?);
        recovered += 1;
    }
    log::info!("{} commands recovered from objcpp compile steps", recovered);

    record::write_database(&json_path, &entries).await?;
    log::info!("✓ Wrote {} ({} entries)", json_path.display(), entries.len());

    Ok(entries.len())
}

/// Re-runs a shim step in dry-run mode to obtain the driver command it wraps.
pub async fn recover_command(step: &ShimCompile, out_dir: &Path) -> Result<CompileCommand> {
    let source = step.source_file()?;

    let program = Tool::resolve_in(step.program(), Some(out_dir))?;
    let output = program.run(step.dry_run_args(), Some(out_dir)).await?;
    let command = String::from_utf8_lossy(&output.stdout).replace('\n', "");

    let file = path::relative_to(Path::new(source), out_dir)?;

    Ok(CompileCommand {
        directory: out_dir.display().to_string(),
        command,
        file: file.display().to_string(),
    })
}
