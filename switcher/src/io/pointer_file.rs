//! Pointer file load/save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::core::pointer::{parse_location, render_location, resolve_build_path};

/// Read the current data location from the pointer file.
///
/// Returns `None` when the file is absent, has no `xbmc.data=` line, or cannot
/// be read (read errors are logged, not returned).
pub fn read_current_location(pointer_path: &Path) -> Option<String> {
    let contents = match fs::read_to_string(pointer_path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %pointer_path.display(), "pointer file does not exist");
            return None;
        }
        Err(err) => {
            error!(path = %pointer_path.display(), err = %err, "error reading current location");
            return None;
        }
    };
    let location = parse_location(&contents);
    debug!(location = ?location, "current location");
    location
}

/// Point the host at `build`, replacing the whole pointer file.
///
/// `build` is a name under `root` or an absolute path. Returns the data path
/// that was written.
pub fn write_pointer(pointer_path: &Path, root: &Path, build: &str) -> Result<PathBuf> {
    let data_path = resolve_build_path(root, build);
    write_atomic(pointer_path, &render_location(&data_path))?;
    info!(path = %data_path.display(), "wrote pointer file");
    Ok(data_path)
}

/// Write to a temp file beside `path`, then rename over it.
///
/// The temp file is removed again if the rename fails.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("properties.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp pointer file {}", tmp_path.display()))?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            error!(path = %tmp_path.display(), err = %cleanup, "failed to remove temp pointer file");
        }
        return Err(err).with_context(|| format!("replace pointer file {}", path.display()));
    }
    Ok(())
}
