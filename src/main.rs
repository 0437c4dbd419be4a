//! objcpp - framework bundle assembly and compiler/linker shim.
//!
//! `objcpp build` creates a versioned .framework from a dylib and its headers;
//! `objcpp compile` and `objcpp link` forward to the toolchain driver.

use objcpp_tools::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run_objcpp().await {
        Ok(code) => code,
        Err(e) => {
            cli::report_error(&e);
            1
        }
    };

    process::exit(exit_code);
}
