//! Pointer file format: a single `xbmc.data=<path>` line read by the host on startup.

use std::path::{Path, PathBuf};

/// Key prefix recognized by the host application.
pub const DATA_KEY_PREFIX: &str = "xbmc.data=";

/// Extract the data path from pointer file contents.
///
/// Returns the value of the first line whose trimmed text starts with
/// [`DATA_KEY_PREFIX`]. Unrecognized lines are ignored. An empty value counts
/// as no location.
pub fn parse_location(contents: &str) -> Option<String> {
    let line = contents
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(DATA_KEY_PREFIX))?;
    let (_, value) = line.split_once('=')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Render pointer file contents for `data_path` (exactly one line).
pub fn render_location(data_path: &Path) -> String {
    format!("{DATA_KEY_PREFIX}{}\n", data_path.display())
}

/// Resolve a build name to the absolute data path written to the pointer file.
///
/// Absolute inputs are kept as-is; relative ones are joined onto `root`.
pub fn resolve_build_path(root: &Path, build: &str) -> PathBuf {
    let candidate = Path::new(build);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    }
}

/// Derive the build name from a pointer location: its last `/`-separated
/// segment, ignoring trailing slashes. Backslashes are part of the name.
pub fn build_name_from_location(location: &str) -> Option<String> {
    let trimmed = location.trim_end_matches('/');
    let name = trimmed.rsplit('/').next()?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}
