//! Command line interface for the objcpp tools.
//!
//! Parses arguments, dispatches to the framework assembler, the shim or the
//! compile database generator, and turns errors into process exit codes.

mod args;

pub use args::{
    BuildArgs, CompileArgs, GenerateArgs, GenerateCommand, GenerateCompilerCommandsArgs,
    LinkArgs, ObjcppArgs, ObjcppCommand, ShimInvocation,
};

use crate::compdb::{self, GenerateSettings};
use crate::error::{Result, ToolError};
use crate::framework::{self, FrameworkSettings, MachOTools};
use crate::shim;

/// Entry point of the `objcpp` binary
pub async fn run_objcpp() -> Result<i32> {
    execute_objcpp(ObjcppArgs::parse_args()).await
}

/// Entry point of the `generate_compiler_commands` binary
pub async fn run_generate_compiler_commands() -> Result<i32> {
    execute_generate(GenerateCompilerCommandsArgs::parse_args()).await
}

/// Executes parsed `objcpp` arguments
pub async fn execute_objcpp(args: ObjcppArgs) -> Result<i32> {
    match args.command {
        ObjcppCommand::Build(build) => {
            build
                .validate()
                .map_err(|reason| ToolError::Configuration { reason })?;
            let tools = MachOTools::resolve(
                &build.install_name_tool,
                &build.codesign,
                build.signing_key.is_some(),
            )?;
            framework::build(&FrameworkSettings::from(&build), &tools).await?;
        }
        ObjcppCommand::Compile(compile) => {
            let invocation = compile.invocation().map_err(ToolError::configuration)?;
            if let Some(line) = run_shim(&invocation).await? {
                println!("{}", line);
            }
        }
        ObjcppCommand::Link(link) => {
            let invocation = link.invocation().map_err(ToolError::configuration)?;
            run_shim(&invocation).await?;
        }
    }
    Ok(0)
}

async fn run_shim(invocation: &ShimInvocation) -> Result<Option<String>> {
    shim::run(invocation.mode, &invocation.driver, &invocation.args).await
}

/// Executes parsed `generate_compiler_commands` arguments
pub async fn execute_generate(args: GenerateCompilerCommandsArgs) -> Result<i32> {
    let GenerateCommand::Generate(generate) = args.command;
    compdb::generate(&GenerateSettings::from(&generate)).await?;
    Ok(0)
}

/// Prints an error for the user: the failing tool's stderr verbatim, then a summary line.
pub fn report_error(error: &ToolError) {
    if let Some(stderr) = error.captured_stderr() {
        eprint!("{}", stderr);
    }
    eprintln!("Error: {}", error);
}
