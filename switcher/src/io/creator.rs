//! Creation of new, empty build directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::core::naming::{is_usable_name, sanitize_build_name};

/// Private data folder the host expects inside every build.
pub const HOST_DATA_DIR: &str = ".kodi";

#[derive(Debug, Error)]
pub enum CreateBuildError {
    #[error("invalid build name '{raw}'")]
    InvalidName { raw: String },
    #[error("build '{name}' already exists")]
    AlreadyExists { name: String },
    #[error("failed to create build directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    /// The build directory exists but is not a valid build yet.
    #[error("created {} but failed to create its .kodi folder: {source}", path.display())]
    Partial { path: PathBuf, source: io::Error },
}

/// A successfully created build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBuild {
    /// Sanitized name, usable with the pointer writer.
    pub name: String,
    pub path: PathBuf,
}

/// Create `<root>/<name>/.kodi` for a user-entered name.
///
/// The name is sanitized first. Nothing is touched if it collides with an
/// existing entry. A partially created directory is left in place.
pub fn create_build(root: &Path, raw_name: &str) -> Result<CreatedBuild, CreateBuildError> {
    let name = sanitize_build_name(raw_name);
    if !is_usable_name(&name) {
        return Err(CreateBuildError::InvalidName {
            raw: raw_name.to_string(),
        });
    }

    let path = root.join(&name);
    if path.exists() {
        return Err(CreateBuildError::AlreadyExists { name });
    }

    if let Err(source) = fs::create_dir(&path) {
        if source.kind() == io::ErrorKind::AlreadyExists {
            return Err(CreateBuildError::AlreadyExists { name });
        }
        error!(path = %path.display(), err = %source, "failed to create build directory");
        return Err(CreateBuildError::CreateDir { path, source });
    }

    if let Err(source) = fs::create_dir(path.join(HOST_DATA_DIR)) {
        error!(path = %path.display(), err = %source, "failed to create host data folder");
        return Err(CreateBuildError::Partial { path, source });
    }

    info!(name = %name, path = %path.display(), "created build");
    Ok(CreatedBuild { name, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn creates_sanitized_build_with_host_folder() {
        let temp = tempfile::tempdir().expect("tempdir");
        let created = create_build(temp.path(), "My Build/Test").expect("create");

        assert_eq!(created.name, "My Build_Test");
        assert_eq!(created.path, temp.path().join("My Build_Test"));
        assert_eq!(entries(&created.path), vec![".kodi"]);
        assert!(created.path.join(".kodi").is_dir());
    }

    #[test]
    fn existing_name_is_rejected_without_changes() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("Test1")).expect("mkdir");

        let err = create_build(temp.path(), " Test1 ").expect_err("should collide");
        assert!(matches!(err, CreateBuildError::AlreadyExists { ref name } if name == "Test1"));
        assert!(err.to_string().contains("already exists"));
        assert!(entries(&temp.path().join("Test1")).is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = create_build(temp.path(), "   ").expect_err("should reject");
        assert!(matches!(err, CreateBuildError::InvalidName { .. }));
        assert!(entries(temp.path()).is_empty());
    }

    #[test]
    fn missing_root_reports_create_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = create_build(&temp.path().join("missing"), "Test1").expect_err("should fail");
        assert!(matches!(err, CreateBuildError::CreateDir { .. }));
    }

    /// Nest `root` until `<root>/<name>` is just under PATH_MAX, so the build
    /// directory can be created but its `.kodi` folder cannot.
    #[cfg(target_os = "linux")]
    #[test]
    fn host_folder_failure_is_partial_and_keeps_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut root = temp.path().to_path_buf();
        let segment = "d".repeat(50);
        while root.as_os_str().len() + 1 + segment.len() <= 3_900 {
            root.push(&segment);
        }
        fs::create_dir_all(&root).expect("nested root");
        // 4093 bytes plus NUL fits in 4096; adding "/.kodi" does not.
        let name = "n".repeat(4_092 - root.as_os_str().len());

        let err = create_build(&root, &name).expect_err("should be partial");
        assert!(matches!(err, CreateBuildError::Partial { .. }));
        assert!(err.to_string().contains("failed to create its .kodi folder"));
        assert!(root.join(&name).is_dir());
    }
}
