//! Build discovery under the configured root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::core::classifier::{Candidate, LAYOUT_MARKERS, classify_builds};

/// Scan `root` for build directories.
///
/// Never fails: a root that cannot be listed is logged and yields an empty
/// list, which callers treat as "no builds found".
pub fn scan_builds(root: &Path, infer_from_layout: bool) -> Vec<String> {
    let candidates = match list_candidates(root) {
        Ok(candidates) => candidates,
        Err(err) => {
            let err = format!("{err:#}");
            error!(root = %root.display(), err = %err, "error scanning directories");
            return Vec::new();
        }
    };
    let builds = classify_builds(&candidates, infer_from_layout);
    info!(root = %root.display(), count = builds.len(), "scanned builds");
    builds
}

/// List the immediate subdirectories of `root` with their layout evidence.
fn list_candidates(root: &Path) -> Result<Vec<Candidate>> {
    let entries = fs::read_dir(root).with_context(|| format!("list {}", root.display()))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "skipping directory with non-UTF-8 name");
            continue;
        };
        let has_layout = LAYOUT_MARKERS
            .iter()
            .any(|marker| path.join(marker).exists());
        debug!(name = %name, has_layout, "found directory");
        candidates.push(Candidate { name, has_layout });
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_applies_layout_and_name_rules() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("KodiBuild1/addons")).expect("mkdir");
        fs::create_dir_all(root.join("plain/userdata")).expect("mkdir");
        fs::create_dir_all(root.join("xbmc-old")).expect("mkdir");
        fs::create_dir_all(root.join("randomfolder")).expect("mkdir");
        fs::write(root.join("kodi.txt"), "not a dir").expect("write");

        let builds = scan_builds(root, true);
        assert_eq!(builds, vec!["KodiBuild1", "plain", "xbmc-old"]);
    }

    #[test]
    fn scan_without_layout_inference_uses_names_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("plain/userdata")).expect("mkdir");
        fs::create_dir_all(root.join("NewBuild")).expect("mkdir");

        let builds = scan_builds(root, false);
        assert_eq!(builds, vec!["NewBuild"]);
    }

    #[test]
    fn missing_root_yields_empty_list() {
        let temp = tempfile::tempdir().expect("tempdir");
        let builds = scan_builds(&temp.path().join("missing"), true);
        assert!(builds.is_empty());
    }
}
