//! I/O adapters for switcher commands.

pub mod config;
pub mod creator;
pub mod host;
pub mod pointer_file;
pub mod process;
pub mod restart;
pub mod scanner;
