//! Command line argument parsing and validation.
//!
//! Two binaries share this module: `objcpp` (framework assembly and the
//! compiler/linker shim) and `generate_compiler_commands`.

use crate::compdb::GenerateSettings;
use crate::framework::FrameworkSettings;
use crate::shim::ShimMode;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Objective-C++ framework builder and compiler shim
#[derive(Parser, Debug)]
#[command(
    name = "objcpp",
    version,
    about = "Objective-C++ framework builder and compiler shim",
    long_about = "Assembles versioned .framework bundles and wraps the compiler/linker driver.

Usage:
  objcpp build --framework-name Art.framework --framework-dylib libart.dylib \\
      --source-root ../.. --out-dir . --input-files art.rsp
  objcpp compile --driver clang++ -- -c ../../art/Art.mm -o obj/Art.o
  objcpp compile --driver clang++ --dry-run -- -c ../../art/Art.mm -o obj/Art.o
  objcpp link --driver clang++ -- -dynamiclib obj/Art.o -o libart.dylib"
)]
pub struct ObjcppArgs {
    #[command(subcommand)]
    pub command: ObjcppCommand,
}

/// `objcpp` subcommands
#[derive(Subcommand, Debug)]
pub enum ObjcppCommand {
    /// Assemble a framework bundle
    Build(BuildArgs),
    /// Compile through the driver, or print the resolved command with --dry-run
    Compile(CompileArgs),
    /// Link through the driver
    Link(LinkArgs),
}

/// Arguments of `objcpp build`
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Bundle directory name, e.g. Art.framework
    #[arg(long, value_name = "NAME")]
    pub framework_name: String,

    /// Linked dynamic library to install as the framework binary
    #[arg(long, value_name = "PATH")]
    pub framework_dylib: PathBuf,

    /// Directory header paths are relative to
    #[arg(long, value_name = "DIR")]
    pub source_root: PathBuf,

    /// Directory to create the bundle in
    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Response file listing the framework inputs
    #[arg(long, value_name = "RESPONSEFILE")]
    pub input_files: PathBuf,

    /// Code signing identity; the library is left unsigned when omitted
    #[arg(long, value_name = "ID", env = "OBJCPP_SIGNING_KEY")]
    pub signing_key: Option<String>,

    /// install_name_tool binary
    #[arg(
        long,
        value_name = "PATH",
        env = "OBJCPP_INSTALL_NAME_TOOL",
        default_value = "install_name_tool"
    )]
    pub install_name_tool: OsString,

    /// codesign binary
    #[arg(
        long,
        value_name = "PATH",
        env = "OBJCPP_CODESIGN",
        default_value = "codesign"
    )]
    pub codesign: OsString,
}

/// Arguments of `objcpp compile`
///
/// Options may also appear among the forwarded arguments; see
/// [`CompileArgs::invocation`].
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Compiler driver to forward to
    #[arg(long, value_name = "PATH")]
    pub driver: Option<String>,

    /// Print the resolved command line instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Arguments forwarded to the driver
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments of `objcpp link`
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Linker driver to forward to
    #[arg(long, value_name = "PATH")]
    pub driver: Option<String>,

    /// Accepted for build graph compatibility and ignored
    #[arg(long = "args", value_name = "ARGS", hide = true)]
    pub link_args: Option<String>,

    /// Arguments forwarded to the driver
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// A shim command line with its own options removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimInvocation {
    pub mode: ShimMode,
    pub driver: String,
    /// Arguments forwarded to the driver, in order
    pub args: Vec<String>,
}

impl ObjcppArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl BuildArgs {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.framework_name.trim().is_empty() {
            return Err("--framework-name cannot be empty".to_string());
        }
        if matches!(self.signing_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err("--signing-key cannot be empty".to_string());
        }
        Ok(())
    }
}

impl From<&BuildArgs> for FrameworkSettings {
    fn from(args: &BuildArgs) -> Self {
        Self {
            framework_name: args.framework_name.clone(),
            framework_dylib: args.framework_dylib.clone(),
            source_root: args.source_root.clone(),
            out_dir: args.out_dir.clone(),
            input_files: args.input_files.clone(),
            signing_key: args.signing_key.clone(),
        }
    }
}

impl CompileArgs {
    /// Resolves the driver invocation.
    ///
    /// clap stops recognizing options at the first forwarded argument, so
    /// `--driver` and `--dry-run` given after it are pulled out of the
    /// forwarded list here. Everything after a literal `--` is left alone.
    pub fn invocation(&self) -> Result<ShimInvocation, String> {
        let mut args = self.args.clone();
        let driver = take_option(&mut args, "--driver")?.or_else(|| self.driver.clone());
        let dry_run = take_flag(&mut args, "--dry-run") || self.dry_run;
        Ok(ShimInvocation {
            mode: ShimMode::Compile { dry_run },
            driver: driver.ok_or("--driver is required")?,
            args,
        })
    }
}

impl LinkArgs {
    /// Resolves the driver invocation, dropping `--args` wherever it appears.
    pub fn invocation(&self) -> Result<ShimInvocation, String> {
        let mut args = self.args.clone();
        let driver = take_option(&mut args, "--driver")?.or_else(|| self.driver.clone());
        take_option(&mut args, "--args")?;
        Ok(ShimInvocation {
            mode: ShimMode::Link,
            driver: driver.ok_or("--driver is required")?,
            args,
        })
    }
}

fn looks_like_option(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/// Removes every `name VALUE` / `name=VALUE` before `--` and returns the last value.
fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>, String> {
    let mut value = None;
    let mut i = 0;
    while i < args.len() && args[i] != "--" {
        if args[i] == name {
            let has_value = args.get(i + 1).is_some_and(|v| !looks_like_option(v));
            if !has_value {
                return Err(format!("{} expects a value", name));
            }
            value = Some(args.remove(i + 1));
            args.remove(i);
        } else if let Some(v) = args[i].strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            value = Some(v.to_string());
            args.remove(i);
        } else {
            i += 1;
        }
    }
    Ok(value)
}

/// Removes every `name` before `--` and reports whether there was one.
fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    let mut found = false;
    let mut i = 0;
    while i < args.len() && args[i] != "--" {
        if args[i] == name {
            args.remove(i);
            found = true;
        } else {
            i += 1;
        }
    }
    found
}

/// Compile database generator for ninja builds with objcpp steps
#[derive(Parser, Debug)]
#[command(
    name = "generate_compiler_commands",
    version,
    about = "Compile database generator for ninja builds with objcpp steps"
)]
pub struct GenerateCompilerCommandsArgs {
    #[command(subcommand)]
    pub command: GenerateCommand,
}

/// `generate_compiler_commands` subcommands
#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// Write compile_commands.json for a build directory
    Generate(GenerateArgs),
}

/// Arguments of `generate_compiler_commands generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Ninja build directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Only scan the commands needed to build this ninja target
    #[arg(long, value_name = "T")]
    pub target: Option<String>,

    /// Output JSON path
    #[arg(long, value_name = "PATH")]
    pub json: PathBuf,

    /// ninja binary
    #[arg(long, value_name = "PATH", env = "NINJA", default_value = "ninja")]
    pub ninja: OsString,
}

impl GenerateCompilerCommandsArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&GenerateArgs> for GenerateSettings {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone(),
            json: args.json.clone(),
            target: args.target.clone(),
            ninja: args.ninja.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definitions_are_consistent() {
        ObjcppArgs::command().debug_assert();
        GenerateCompilerCommandsArgs::command().debug_assert();
    }

    #[test]
    fn compile_forwards_everything_after_separator() {
        let args = ObjcppArgs::try_parse_from([
            "objcpp", "compile", "--driver", "/usr/bin/clang", "--dry-run", "--", "-c", "a.mm",
            "-o", "a.o",
        ])
        .unwrap();
        match args.command {
            ObjcppCommand::Compile(compile) => {
                let invocation = compile.invocation().unwrap();
                assert_eq!(invocation.driver, "/usr/bin/clang");
                assert_eq!(invocation.mode, ShimMode::Compile { dry_run: true });
                assert_eq!(invocation.args, vec!["-c", "a.mm", "-o", "a.o"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn compile_forwards_trailing_args_without_separator() {
        let args = ObjcppArgs::try_parse_from([
            "objcpp", "compile", "--driver", "clang++", "-c", "a.mm", "-o", "a.o",
        ])
        .unwrap();
        match args.command {
            ObjcppCommand::Compile(compile) => {
                let invocation = compile.invocation().unwrap();
                assert_eq!(invocation.mode, ShimMode::Compile { dry_run: false });
                assert_eq!(invocation.args, vec!["-c", "a.mm", "-o", "a.o"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn compile_invocation(argv: &[&str]) -> Result<ShimInvocation, String> {
        let args = ObjcppArgs::try_parse_from(["objcpp", "compile"].iter().chain(argv)).unwrap();
        match args.command {
            ObjcppCommand::Compile(compile) => compile.invocation(),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn compile_options_are_recognized_after_forwarded_args() {
        let invocation = compile_invocation(&[
            "-c", "a.mm", "-o", "a.o", "--driver", "/usr/bin/clang", "--dry-run",
        ])
        .unwrap();
        assert_eq!(invocation.driver, "/usr/bin/clang");
        assert_eq!(invocation.mode, ShimMode::Compile { dry_run: true });
        assert_eq!(invocation.args, vec!["-c", "a.mm", "-o", "a.o"]);

        let invocation = compile_invocation(&["-c", "a.mm", "--driver=clang++"]).unwrap();
        assert_eq!(invocation.driver, "clang++");
        assert_eq!(invocation.args, vec!["-c", "a.mm"]);
    }

    #[test]
    fn compile_without_driver_is_rejected() {
        assert!(compile_invocation(&["-c", "a.mm"]).is_err());
        assert!(compile_invocation(&["-c", "a.mm", "--driver"]).is_err());
        assert!(compile_invocation(&["-c", "a.mm", "--driver", "--dry-run"]).is_err());
    }

    #[test]
    fn link_ignores_args_option() {
        let args = ObjcppArgs::try_parse_from([
            "objcpp", "link", "--args", "@libart.rsp", "--driver", "clang++", "--", "-dynamiclib",
            "obj/a.o", "-o", "libart.dylib",
        ])
        .unwrap();
        let ObjcppCommand::Link(link) = args.command else {
            panic!("expected link");
        };
        let invocation = link.invocation().unwrap();
        assert_eq!(invocation.mode, ShimMode::Link);
        assert_eq!(invocation.driver, "clang++");
        assert_eq!(invocation.args, vec!["-dynamiclib", "obj/a.o", "-o", "libart.dylib"]);

        let args = ObjcppArgs::try_parse_from([
            "objcpp", "link", "--driver", "clang++", "obj/a.o", "--args", "x", "-o", "libart.dylib",
        ])
        .unwrap();
        let ObjcppCommand::Link(link) = args.command else {
            panic!("expected link");
        };
        assert_eq!(link.invocation().unwrap().args, vec!["obj/a.o", "-o", "libart.dylib"]);
    }

    #[test]
    fn build_requires_framework_inputs() {
        let err = ObjcppArgs::try_parse_from(["objcpp", "build", "--framework-name", "Foo.framework"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn build_args_map_to_settings() {
        let args = ObjcppArgs::try_parse_from([
            "objcpp",
            "build",
            "--framework-name",
            "Foo.framework",
            "--framework-dylib",
            "libfoo.dylib",
            "--source-root",
            "../..",
            "--out-dir",
            ".",
            "--input-files",
            "foo.rsp",
            "--signing-key",
            "Apple Development",
        ])
        .unwrap();
        let ObjcppCommand::Build(build) = args.command else {
            panic!("expected build");
        };
        build.validate().unwrap();
        let settings = FrameworkSettings::from(&build);
        assert_eq!(settings.framework_name, "Foo.framework");
        assert_eq!(settings.framework_dylib, PathBuf::from("libfoo.dylib"));
        assert_eq!(settings.signing_key.as_deref(), Some("Apple Development"));
    }

    #[test]
    fn generate_target_is_optional() {
        let args = GenerateCompilerCommandsArgs::try_parse_from([
            "generate_compiler_commands",
            "generate",
            "--out-dir",
            "out/debug",
            "--json",
            "compile_commands.json",
        ])
        .unwrap();
        let GenerateCommand::Generate(generate) = args.command;
        let settings = GenerateSettings::from(&generate);
        assert_eq!(settings.out_dir, PathBuf::from("out/debug"));
        assert_eq!(settings.target, None);
    }
}
