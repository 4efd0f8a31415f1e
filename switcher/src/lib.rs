//! Switch a media-center host between independently installed build
//! directories.
//!
//! A build is a data directory under a fixed root. The host reads a pointer
//! file (`xbmc.data=<path>`) on startup to decide which build to load; this
//! crate discovers builds, creates new ones, rewrites the pointer file, and
//! stops the host so the next start picks up the change.
//!
//! - **[`core`]**: Pure, deterministic logic (classification, pointer format,
//!   menu construction, name sanitization). No I/O.
//! - **[`io`]**: Side-effecting adapters (config, filesystem, child processes,
//!   host control).
//!
//! [`switch`] coordinates both with the [`ui`] dialog surface to implement the
//! interactive workflow.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod switch;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod ui;
