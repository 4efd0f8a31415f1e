//! Deterministic, pure logic shared by the switcher.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data (directory listings, pointer file text, menu entries) and return
//! deterministic outputs suitable for tests.

pub mod classifier;
pub mod menu;
pub mod naming;
pub mod pointer;
pub mod types;
