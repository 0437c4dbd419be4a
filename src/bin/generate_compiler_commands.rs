//! generate_compiler_commands - compile_commands.json for ninja builds with objcpp steps.

use objcpp_tools::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let exit_code = match cli::run_generate_compiler_commands().await {
        Ok(code) => code,
        Err(e) => {
            cli::report_error(&e);
            1
        }
    };

    process::exit(exit_code);
}
