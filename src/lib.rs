//! Build tooling for Objective-C++ frameworks
//!
//! This library provides:
//! - Versioned `.framework` bundle assembly (headers, umbrella header,
//!   module map, renamed and signed dylib)
//! - A compiler/linker shim that can report the command it would run
//! - Compile database generation that sees through the shim
//!
//! It backs the `objcpp` and `generate_compiler_commands` binaries.

pub mod cli;
pub mod compdb;
pub mod error;
pub mod framework;
pub mod shim;
pub mod toolchain;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, ToolError};
