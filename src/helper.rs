//! Path-typed argument validation.
//!
//! `existing_dir` and `existing_package` have the `fn(&str) -> Result<T, E>`
//! shape clap accepts as a value parser, so a failed check surfaces as an
//! ordinary argument error naming the offending path.

use std::path::{Component, Path, PathBuf};

use crate::errors::PathError;
use crate::manifest::{PACKAGE_MANIFEST_FILENAME, package_exists_at};

/// Require `path` to exist and be a directory. Returns it unchanged.
pub fn existing_dir(path: &str) -> Result<PathBuf, PathError> {
    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(PathError::NotFound { path });
    }
    if !path.is_dir() {
        return Err(PathError::NotADirectory { path });
    }
    Ok(path)
}

/// Require `path` to be an existing directory containing a package manifest.
pub fn existing_package(path: &str) -> Result<PathBuf, PathError> {
    let path = existing_dir(path)?;
    if !package_exists_at(&path) {
        return Err(PathError::MissingManifest {
            path,
            manifest: PACKAGE_MANIFEST_FILENAME,
        });
    }
    Ok(path)
}

/// Resolve an optional path argument.
///
/// Without an argument the default is relative to `base_path`; an explicit
/// argument is relative to `cwd` (or already absolute) and is normalised.
pub fn determine_path_argument(
    cwd: &Path,
    base_path: &Path,
    argument: Option<&Path>,
    default: &Path,
) -> PathBuf {
    match argument {
        None => base_path.join(default),
        Some(argument) => absolute(cwd, argument),
    }
}

/// `path` made absolute against `cwd` and lexically normalised.
pub fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    normalize(&cwd.join(path))
}

/// Lexically collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                // a relative path keeps the `..` it cannot collapse
                None | Some(Component::ParentDir) => out.push(".."),
                Some(_) => {
                    out.pop();
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_dir_rejects_missing_path() {
        let err = existing_dir("/path/that/does/not/exist").unwrap_err();
        assert!(matches!(err, PathError::NotFound { .. }));
        assert!(err.to_string().contains("/path/that/does/not/exist"));
    }

    #[test]
    fn test_existing_dir_rejects_regular_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = existing_dir(file.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory { .. }));
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_existing_dir_returns_path_unchanged() {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().to_str().unwrap();
        assert_eq!(existing_dir(raw).unwrap(), PathBuf::from(raw));
    }

    #[test]
    fn test_existing_package_requires_manifest() {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().to_str().unwrap();

        let err = existing_package(raw).unwrap_err();
        assert!(matches!(err, PathError::MissingManifest { .. }));
        assert!(err.to_string().contains("package.xml"));

        std::fs::write(dir.path().join(PACKAGE_MANIFEST_FILENAME), "<package/>").unwrap();
        assert_eq!(existing_package(raw).unwrap(), PathBuf::from(raw));
    }

    #[test]
    fn test_existing_package_checks_directory_first() {
        let err = existing_package("/path/that/does/not/exist").unwrap_err();
        assert!(matches!(err, PathError::NotFound { .. }));
    }

    #[test]
    fn test_determine_path_argument_default_is_base_relative() {
        let p = determine_path_argument(
            Path::new("/work"),
            Path::new("/proj"),
            None,
            Path::new("build"),
        );
        assert_eq!(p, PathBuf::from("/proj/build"));
    }

    #[test]
    fn test_determine_path_argument_relative_is_cwd_relative() {
        let p = determine_path_argument(
            Path::new("/work"),
            Path::new("/proj"),
            Some(Path::new("out")),
            Path::new("build"),
        );
        assert_eq!(p, PathBuf::from("/work/out"));
    }

    #[test]
    fn test_determine_path_argument_absolute_is_unchanged() {
        let p = determine_path_argument(
            Path::new("/work"),
            Path::new("/proj"),
            Some(Path::new("/abs/out")),
            Path::new("build"),
        );
        assert_eq!(p, PathBuf::from("/abs/out"));
    }

    #[test]
    fn test_determine_path_argument_normalizes_explicit_argument() {
        let p = determine_path_argument(
            Path::new("/work/sub"),
            Path::new("/proj"),
            Some(Path::new("../out/./x")),
            Path::new("build"),
        );
        assert_eq!(p, PathBuf::from("/work/out/x"));
    }

    #[test]
    fn test_normalize_does_not_climb_above_root() {
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent_of_relative_path() {
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize(Path::new("a/../../b/./c")), PathBuf::from("../b/c"));
        assert_eq!(absolute(Path::new("rel"), Path::new("../../y")), PathBuf::from("../y"));
    }
}
