//! Stable exit codes for build-switcher CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid config, failed write/create, or an unexpected error.
pub const INVALID: i32 = 1;
/// The user declined at a prompt.
pub const CANCELLED: i32 = 2;
/// No builds found (abort policy) or no current location set.
pub const NOT_FOUND: i32 = 3;
