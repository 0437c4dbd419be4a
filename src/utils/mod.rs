//! Filesystem and path helpers shared by the tools.

pub mod fs;
pub mod path;
